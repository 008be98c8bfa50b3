use serde::Serialize;

use crate::graph::Episode;
use crate::protocol::{AddMemoryParams, ToolResult};
use crate::state::ServerState;

#[derive(Debug, Serialize)]
struct AddMemoryResponse {
    success: bool,
    message: String,
    queue_position: usize,
}

/// Handle an `add_memory` tool call.
///
/// The episode is queued for sequential per-group ingestion and the call
/// returns immediately; persistence happens on the group's worker task.
pub async fn handle(params: AddMemoryParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    let group_id = state.config.group_or_default(params.group_id.as_deref());
    let episode = Episode::new(
        params.name.clone(),
        params.episode_body,
        params.source,
        params.source_description,
        group_id,
    );

    let queue_position = state.ingest.enqueue(store, episode).await;

    ToolResult::json(&AddMemoryResponse {
        success: true,
        message: format!("Episode '{}' queued for processing", params.name),
        queue_position,
    })
}
