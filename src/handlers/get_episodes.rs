use serde::Serialize;

use crate::graph::Episode;
use crate::protocol::{GetEpisodesParams, McpErrorCode, McpErrorResponse, ToolResult};
use crate::state::ServerState;

/// Default episode count when `last_n` is omitted.
const DEFAULT_LAST_N: usize = 10;

#[derive(Debug, Serialize)]
struct GetEpisodesResponse {
    group_id: String,
    episodes: Vec<Episode>,
    total: usize,
    success: bool,
}

/// Handle a `get_episodes` tool call.
///
/// Returns the last N episodes for the group, oldest first.
pub async fn handle(params: GetEpisodesParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    let last_n = match super::result_limit(params.last_n, DEFAULT_LAST_N) {
        Ok(n) => n,
        Err(err) => return err,
    };
    let group_id = state.config.group_or_default(params.group_id.as_deref());

    match store.recent_episodes(&group_id, last_n).await {
        Ok(episodes) => {
            let total = episodes.len();
            ToolResult::json(&GetEpisodesResponse {
                group_id,
                episodes,
                total,
                success: true,
            })
        }
        Err(e) => {
            tracing::error!("get_episodes failed: {e}");
            McpErrorResponse::new(McpErrorCode::QueryFailed, e.to_string()).into()
        }
    }
}
