use serde::Serialize;

use crate::protocol::{ToolResult, UuidParams};
use crate::state::ServerState;

#[derive(Debug, Serialize)]
struct DeleteEpisodeResponse {
    success: bool,
    message: String,
}

/// Handle a `delete_episode` tool call.
pub async fn handle(params: UuidParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    match store.delete_episode(&params.uuid).await {
        Ok(()) => ToolResult::json(&DeleteEpisodeResponse {
            success: true,
            message: format!("Episode with UUID {} deleted successfully", params.uuid),
        }),
        Err(e) => super::graph_error(e),
    }
}
