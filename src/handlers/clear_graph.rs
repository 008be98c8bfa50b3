use serde::Serialize;

use crate::protocol::ToolResult;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
struct ClearGraphResponse {
    success: bool,
    message: String,
}

/// Handle a `clear_graph` tool call.
///
/// Deletes every node and relationship and rebuilds indices. Calling it on
/// an already-empty graph succeeds the same way.
pub async fn handle(state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    match store.clear().await {
        Ok(()) => ToolResult::json(&ClearGraphResponse {
            success: true,
            message: "Graph cleared successfully and indices rebuilt".into(),
        }),
        Err(e) => super::graph_error(e),
    }
}
