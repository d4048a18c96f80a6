//! JSON diagnostics on stderr.
//!
//! stdout carries the protocol, so every log record goes to stderr as one
//! JSON object per line, e.g.
//!
//! ```text
//! {"timestamp":"2026-10-19T09:14:03.512Z","level":"INFO","message":"tool invoked","tool":"ranger","status":"success","target":"ranger_mcp_server::handlers::ranger"}
//! ```

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Fixed filter; the binary reads no environment.
const DEFAULT_FILTER: &str = "info";

/// Build the JSON subscriber over any writer factory.
pub fn json_subscriber<W>(make_writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
        .with_writer(make_writer)
        .finish()
}

/// Install the stderr JSON subscriber as the process-wide default.
pub fn init() -> Result<(), ServerError> {
    tracing::subscriber::set_global_default(json_subscriber(std::io::stderr))?;
    Ok(())
}
