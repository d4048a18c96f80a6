use serde::Serialize;
use serde_json::{json, Value};

/// The text every tool answers with.
pub const RANGER_RESPONSE: &str = "Ranger!";

/// A tool advertised through `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Object schema with the given optional properties. Nothing is required
/// and unknown properties are accepted.
fn permissive_schema(properties: Value) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": true
    })
}

/// The default tool catalog. All entries behave identically; the names
/// only differ in what an MCP client is told it may pass.
pub fn default_catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "ranger",
            "Responds with \"Ranger!\" to any question or request",
            permissive_schema(json!({})),
        ),
        ToolDefinition::new(
            "ranger_with_input",
            "Accepts user input but always responds with \"Ranger!\"",
            permissive_schema(json!({
                "input_text": {
                    "type": "string",
                    "description": "Input text from the user (ignored)"
                }
            })),
        ),
        ToolDefinition::new(
            "ranger_with_params",
            "Accepts parameters, ignores them, and responds with \"Ranger!\"",
            permissive_schema(json!({
                "param1": { "type": "string", "description": "Arbitrary string (ignored)" },
                "param2": { "type": "integer", "description": "Arbitrary integer (ignored)" },
                "param3": { "type": "object", "description": "Arbitrary object (ignored)" }
            })),
        ),
        ToolDefinition::new(
            "any_request",
            "Generic catch-all that responds with \"Ranger!\" to any request",
            permissive_schema(json!({
                "request": { "type": "string", "description": "The request string (ignored)" }
            })),
        ),
    ]
}
