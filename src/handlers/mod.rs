pub mod ranger;

use serde_json::json;

use crate::config::ServerConfig;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolResult,
};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, config: &ServerConfig) -> Option<JsonRpcResponse> {
    let response = match req.method.as_str() {
        "initialize" => {
            log_client(req);
            let result = json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": config.server_name,
                    "version": config.server_version
                }
            });
            JsonRpcResponse::success(req.id.clone(), result)
        }

        "notifications/initialized" => return None,

        "ping" => JsonRpcResponse::success(req.id.clone(), json!({})),

        "tools/list" => JsonRpcResponse::success(req.id.clone(), json!({ "tools": config.tools })),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return reply(
                            req,
                            JsonRpcResponse::error(
                                req.id.clone(),
                                JsonRpcError::invalid_params(format!(
                                    "Invalid tools/call params: {e}"
                                )),
                            ),
                        );
                    }
                },
                None => {
                    return reply(
                        req,
                        JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params("Missing params for tools/call"),
                        ),
                    );
                }
            };

            let tool_result = dispatch_tool_call(&params, config).await;
            match serde_json::to_value(&tool_result) {
                Ok(result_json) => JsonRpcResponse::success(req.id.clone(), result_json),
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize tool result");
                    JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::internal_error("Failed to serialize tool result"),
                    )
                }
            }
        }

        _ => JsonRpcResponse::error(req.id.clone(), JsonRpcError::method_not_found(&req.method)),
    };

    reply(req, response)
}

/// Drop the response when the request was a notification.
fn reply(req: &JsonRpcRequest, response: JsonRpcResponse) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        None
    } else {
        Some(response)
    }
}

fn log_client(req: &JsonRpcRequest) {
    let params = req
        .params
        .as_ref()
        .and_then(|v| serde_json::from_value::<InitializeParams>(v.clone()).ok());
    let client = params.as_ref().and_then(|p| p.client_info.as_ref());
    tracing::info!(
        client_name = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
        client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
        protocol_version = params
            .as_ref()
            .and_then(|p| p.protocol_version.as_deref())
            .unwrap_or("unspecified"),
        "client initializing"
    );
}

async fn dispatch_tool_call(params: &ToolCallParams, config: &ServerConfig) -> ToolResult {
    if config.accepts_tool(&params.name) {
        return ranger::handle(&params.name).await;
    }

    tracing::warn!(tool = %params.name, status = "unknown_tool", "tool not found");
    ToolResult::error(format!("Unknown tool: {}", params.name))
}
