use serde::Serialize;

use crate::graph::EntityNode;
use crate::protocol::{McpErrorCode, McpErrorResponse, SearchNodesParams, ToolResult};
use crate::state::ServerState;

/// Default result limit when `max_nodes` is omitted.
const DEFAULT_MAX_NODES: usize = 10;

#[derive(Debug, Serialize)]
struct SearchNodesResponse {
    query: String,
    nodes: Vec<EntityNode>,
    total: usize,
    success: bool,
}

/// Handle a `search_memory_nodes` tool call.
///
/// The query is forwarded to the database's fulltext index; ranking stays
/// inside the backend.
pub async fn handle(params: SearchNodesParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    let limit = match super::result_limit(params.max_nodes, DEFAULT_MAX_NODES) {
        Ok(l) => l,
        Err(err) => return err,
    };
    let group_ids = params
        .group_ids
        .unwrap_or_else(|| vec![state.config.default_group_id.clone()]);

    match store.search_nodes(&params.query, &group_ids, limit).await {
        Ok(nodes) => {
            let total = nodes.len();
            ToolResult::json(&SearchNodesResponse {
                query: params.query,
                nodes,
                total,
                success: true,
            })
        }
        Err(e) => {
            tracing::error!("search_memory_nodes failed: {e}");
            McpErrorResponse::new(McpErrorCode::QueryFailed, e.to_string()).into()
        }
    }
}
