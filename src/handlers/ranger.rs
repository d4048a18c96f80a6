use crate::protocol::ToolResult;
use crate::tools::RANGER_RESPONSE;

/// Handle a call to any accepted tool.
///
/// Takes no arguments; the answer never depends on them. Emits exactly one
/// log record per call.
pub async fn handle(tool: &str) -> ToolResult {
    tracing::info!(tool, status = "success", "tool invoked");
    ToolResult::text(RANGER_RESPONSE)
}
