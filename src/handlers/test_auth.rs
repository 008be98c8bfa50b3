use serde::Serialize;

use crate::config::ServerConfig;
use crate::protocol::ToolResult;
use crate::state::{GraphStatus, ServerState};

#[derive(Debug, Serialize)]
struct AuthReport {
    success: bool,
    status: &'static str,
    uri: String,
    user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnosis: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solutions: Option<Vec<String>>,
}

/// Handle a `test_neo4j_auth` tool call.
///
/// Read-only probe: a live connection runs `RETURN 1`; a failed startup
/// connection is reported with its stored error. Graph state is never
/// mutated either way.
pub async fn handle(state: &ServerState) -> ToolResult {
    let report = match &state.graph {
        GraphStatus::Connected(store) => match store.verify().await {
            Ok(()) => AuthReport {
                success: true,
                status: "connected",
                uri: state.config.uri.clone(),
                user: state.config.user.clone(),
                error: None,
                diagnosis: None,
                solutions: None,
            },
            Err(e) => failure_report(e.to_string(), &state.config),
        },
        GraphStatus::Unavailable(reason) => failure_report(reason.clone(), &state.config),
    };

    ToolResult::json(&report)
}

fn failure_report(error: String, config: &ServerConfig) -> AuthReport {
    let (diagnosis, solutions) = diagnose(&error, config);
    AuthReport {
        success: false,
        status: "disconnected",
        uri: config.uri.clone(),
        user: config.user.clone(),
        error: Some(error),
        diagnosis: Some(diagnosis),
        solutions: Some(solutions),
    }
}

/// Map a raw driver error onto the troubleshooting guidance the original
/// server printed for operators.
///
/// Authentication patterns are checked first: the stored error is usually a
/// `GraphError::Connect` whose own prefix mentions the connection, so a
/// broad connection pattern would shadow every other diagnosis.
fn diagnose(error: &str, config: &ServerConfig) -> (&'static str, Vec<String>) {
    let lowered = error.to_lowercase();

    if lowered.contains("unauthorized") || lowered.contains("authentication") {
        (
            "Authentication failed",
            vec![
                "Check NEO4J_USER and NEO4J_PASSWORD".into(),
                "Reset password: neo4j-admin dbms set-initial-password <password>".into(),
            ],
        )
    } else if lowered.contains("connection refused")
        || lowered.contains("unreachable")
        || lowered.contains("timed out")
    {
        (
            "Neo4j server is not running or unreachable",
            vec![
                "Start Neo4j: neo4j start".into(),
                "Check status: neo4j status".into(),
                format!("Verify NEO4J_URI points at the bolt endpoint: {}", config.uri),
            ],
        )
    } else {
        (
            "Unrecognized connection failure",
            vec!["Check the server log on stderr for the full driver error".into()],
        )
    }
}
