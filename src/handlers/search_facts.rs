use serde::Serialize;

use crate::graph::EntityEdge;
use crate::protocol::{McpErrorCode, McpErrorResponse, SearchFactsParams, ToolResult};
use crate::state::ServerState;

/// Default result limit when `max_facts` is omitted.
const DEFAULT_MAX_FACTS: usize = 10;

#[derive(Debug, Serialize)]
struct SearchFactsResponse {
    query: String,
    facts: Vec<EntityEdge>,
    total: usize,
    success: bool,
}

/// Handle a `search_memory_facts` tool call.
pub async fn handle(params: SearchFactsParams, state: &ServerState) -> ToolResult {
    let store = match state.store() {
        Some(s) => s,
        None => return super::graph_unavailable(state),
    };

    let limit = match super::result_limit(params.max_facts, DEFAULT_MAX_FACTS) {
        Ok(l) => l,
        Err(err) => return err,
    };
    let group_ids = params
        .group_ids
        .unwrap_or_else(|| vec![state.config.default_group_id.clone()]);

    match store.search_facts(&params.query, &group_ids, limit).await {
        Ok(facts) => {
            let total = facts.len();
            ToolResult::json(&SearchFactsResponse {
                query: params.query,
                facts,
                total,
                success: true,
            })
        }
        Err(e) => {
            tracing::error!("search_memory_facts failed: {e}");
            McpErrorResponse::new(McpErrorCode::QueryFailed, e.to_string()).into()
        }
    }
}
