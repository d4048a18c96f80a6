use std::fs;
use std::path::PathBuf;

use ranger_mcp_server::config::ServerConfig;
use ranger_mcp_server::server::McpServer;
use serde_json::Value;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/fixtures")
}

fn expected_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name)
}

fn parse_lines(text: &str) -> Vec<Value> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("transcript line must be JSON"))
        .collect()
}

/// Pin `serverInfo.version` so the transcript survives version bumps.
fn golden_config() -> ServerConfig {
    ServerConfig {
        server_version: "golden".to_string(),
        ..ServerConfig::default()
    }
}

async fn replay(input: &[u8]) -> String {
    let mut server = McpServer::new(golden_config());
    let mut out = Vec::new();
    server.serve(input, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn golden_session_transcript() {
    let input = fs::read(fixtures_root().join("session.jsonl")).expect("fixture session missing");
    let expected = fs::read_to_string(expected_path("session.jsonl")).expect("expected file missing");

    let actual = replay(&input).await;

    let actual_lines = parse_lines(&actual);
    let expected_lines = parse_lines(&expected);
    assert_eq!(actual_lines.len(), expected_lines.len(), "response count mismatch:\n{actual}");

    for (i, (got, want)) in actual_lines.iter().zip(&expected_lines).enumerate() {
        assert_eq!(got, want, "response {i} does not match golden");
    }
}

#[tokio::test]
async fn golden_session_is_byte_stable_across_runs() {
    let input = fs::read(fixtures_root().join("session.jsonl")).expect("fixture session missing");

    let first = replay(&input).await;
    let second = replay(&input).await;

    assert_eq!(first, second, "transcript must be byte-identical across runs");
}
