use ranger_mcp_server::config::ServerConfig;
use ranger_mcp_server::logging;
use ranger_mcp_server::server::{run_until_interrupted, Exit, McpServer};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = logging::init() {
        eprintln!("ranger-mcp-server: {e}");
        std::process::exit(1);
    }

    tracing::info!("Starting Ranger MCP server");

    let config = ServerConfig::default();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Failed to start server");
        std::process::exit(1);
    }

    let mut server = McpServer::new(config);
    match run_until_interrupted(server.run(), tokio::signal::ctrl_c()).await {
        Ok(Exit::InputClosed) => {}
        Ok(Exit::Interrupted) => {
            tracing::info!("Server stopped by user");
            // The blocking stdin reader would otherwise hold the runtime open.
            std::process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            std::process::exit(1);
        }
    }
}
