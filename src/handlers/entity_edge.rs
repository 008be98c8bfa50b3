use serde::Serialize;

use crate::graph::EntityEdge;
use crate::protocol::{ToolResult, UuidParams};
use crate::state::ServerState;

#[derive(Debug, Serialize)]
struct GetEntityEdgeResponse {
    success: bool,
    edge: EntityEdge,
}

#[derive(Debug, Serialize)]
struct DeleteEntityEdgeResponse {
    success: bool,
    message: String,
}

/// Handle a `get_entity_edge` tool call.
pub async fn handle_get(params: UuidParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    match store.entity_edge(&params.uuid).await {
        Ok(edge) => ToolResult::json(&GetEntityEdgeResponse {
            success: true,
            edge,
        }),
        Err(e) => super::graph_error(e),
    }
}

/// Handle a `delete_entity_edge` tool call.
pub async fn handle_delete(params: UuidParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    match store.delete_entity_edge(&params.uuid).await {
        Ok(()) => ToolResult::json(&DeleteEntityEdgeResponse {
            success: true,
            message: format!("Entity edge with UUID {} deleted successfully", params.uuid),
        }),
        Err(e) => super::graph_error(e),
    }
}
