use crate::error::ServerError;
use crate::schema;
use crate::tools::{self, ToolDefinition};

/// Default maximum bytes per JSON-RPC message (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Server configuration.
///
/// The binary takes no flags or environment variables; everything here is
/// fixed at build time through [`Default`]. Embedders and tests construct
/// their own.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Name reported in `serverInfo`.
    pub server_name: String,
    /// Version reported in `serverInfo`.
    pub server_version: String,
    /// Accepted tool identifiers, in `tools/list` order.
    pub tools: Vec<ToolDefinition>,
    pub max_message_bytes: usize,
}

impl ServerConfig {
    /// Whether `name` is one of the accepted tool identifiers.
    pub fn accepts_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    /// Check that every advertised input schema compiles.
    pub fn validate(&self) -> Result<(), ServerError> {
        for tool in &self.tools {
            schema::check_schema(&tool.input_schema).map_err(|source| {
                ServerError::InvalidToolSchema {
                    tool: tool.name.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "ranger server".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            tools: tools::default_catalog(),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}
