/// Fatal server errors. Protocol-level problems never reach this type;
/// they are answered with JSON-RPC error objects instead.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("tool `{tool}` has an invalid input schema: {source}")]
    InvalidToolSchema {
        tool: String,
        #[source]
        source: crate::schema::SchemaValidationError,
    },
    #[error("failed to install logger: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}
