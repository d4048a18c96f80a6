//! JSON Schema checks for tool input schemas and emitted payloads.

use jsonschema::validator_for;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Instance validation failed: {0}")]
    ValidationFailed(String),
}

/// Shape of every successful tool result this server produces (frozen).
pub const TOOL_RESULT_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Ranger tool result",
  "type": "object",
  "required": ["content"],
  "additionalProperties": false,
  "properties": {
    "content": {
      "type": "array",
      "minItems": 1,
      "maxItems": 1,
      "items": {
        "type": "object",
        "required": ["type", "text"],
        "additionalProperties": false,
        "properties": {
          "type": { "const": "text" },
          "text": { "const": "Ranger!" }
        }
      }
    }
  }
}"#;

/// Shape of the log record written for every tool invocation (frozen).
pub const INVOCATION_LOG_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Tool invocation log record",
  "type": "object",
  "required": ["timestamp", "level", "target", "message", "tool", "status"],
  "properties": {
    "timestamp": { "type": "string", "minLength": 1 },
    "target": { "type": "string", "pattern": "^ranger_mcp_server" },
    "level": { "const": "INFO" },
    "message": { "const": "tool invoked" },
    "tool": { "type": "string", "minLength": 1 },
    "status": { "const": "success" }
  }
}"#;

/// Check that `schema` compiles as a JSON Schema (draft 2020-12).
pub fn check_schema(schema: &Value) -> Result<(), SchemaValidationError> {
    validator_for(schema)
        .map(|_| ())
        .map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))
}

/// Validate a parsed instance against a parsed schema.
pub fn validate_value(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    let first_error = validator.iter_errors(instance).next().map(|e| e.to_string());
    match first_error {
        None => Ok(()),
        Some(err) => Err(SchemaValidationError::ValidationFailed(err)),
    }
}

/// Validate a JSON instance against a JSON Schema, both given as text.
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;
    validate_value(&schema_json, &instance_json)
}
