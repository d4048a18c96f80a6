//! Minimal MCP server that answers every tool call with `"Ranger!"`.
//!
//! Exposes a fixed set of interchangeable tools (`ranger`,
//! `ranger_with_input`, `ranger_with_params`, `any_request`) over JSON-RPC 2.0
//! stdio transport. Arguments are never read. Every call is logged to stderr
//! as one JSON record. Useful as a smoke-test fixture for MCP clients.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod tools;

pub mod schema;
