pub mod add_memory;
pub mod clear_graph;
pub mod delete_episode;
pub mod entity_edge;
pub mod get_episodes;
pub mod search_facts;
pub mod search_nodes;
pub mod test_auth;

use serde::de::DeserializeOwned;

use crate::catalog;
use crate::graph::GraphError;
use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode, McpErrorResponse, ToolCallParams,
    ToolResult,
};
use crate::state::ServerState;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, state: &ServerState) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-memory-server",
                    "version": env!("CARGO_PKG_VERSION"),
                    "graph_status": state.status_label(),
                    "initialization_error": state.initialization_error(),
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": catalog::tools_json(),
                "graph_status": state.status_label(),
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let timeout = state.config.tool_timeout;
            let tool_result =
                match tokio::time::timeout(timeout, dispatch_tool_call(&params, state)).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::error!(
                            "tool {} timed out after {} seconds",
                            params.name,
                            timeout.as_secs()
                        );
                        McpErrorResponse::canonical(McpErrorCode::InternalError).into()
                    }
                };
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Validate arguments against the tool's declared schema, then run it.
pub async fn dispatch_tool_call(params: &ToolCallParams, state: &ServerState) -> ToolResult {
    let spec = match catalog::find(&params.name) {
        Some(spec) => spec,
        None => return ToolResult::error(format!("Unknown tool: {}", params.name)),
    };

    let arguments = params
        .arguments
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));

    if let Err(message) = catalog::validate_arguments(spec, &arguments) {
        return McpErrorResponse::new(McpErrorCode::InvalidArguments, message).into();
    }

    match params.name.as_str() {
        "add_memory" => match decode(&params.name, arguments) {
            Ok(p) => add_memory::handle(p, state).await,
            Err(r) => r,
        },
        "search_memory_nodes" => match decode(&params.name, arguments) {
            Ok(p) => search_nodes::handle(p, state).await,
            Err(r) => r,
        },
        "search_memory_facts" => match decode(&params.name, arguments) {
            Ok(p) => search_facts::handle(p, state).await,
            Err(r) => r,
        },
        "get_episodes" => match decode(&params.name, arguments) {
            Ok(p) => get_episodes::handle(p, state).await,
            Err(r) => r,
        },
        "delete_episode" => match decode(&params.name, arguments) {
            Ok(p) => delete_episode::handle(p, state).await,
            Err(r) => r,
        },
        "delete_entity_edge" => match decode(&params.name, arguments) {
            Ok(p) => entity_edge::handle_delete(p, state).await,
            Err(r) => r,
        },
        "get_entity_edge" => match decode(&params.name, arguments) {
            Ok(p) => entity_edge::handle_get(p, state).await,
            Err(r) => r,
        },
        "clear_graph" => clear_graph::handle(state).await,
        "test_neo4j_auth" => test_auth::handle(state).await,
        // Unreachable while the catalog and this match agree.
        other => ToolResult::error(format!("Unknown tool: {other}")),
    }
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: serde_json::Value) -> Result<T, ToolResult> {
    serde_json::from_value(arguments).map_err(|e| {
        McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Invalid arguments for {tool}: {e}"),
        )
        .into()
    })
}

/// Tool result for calls arriving while the graph backend is down.
pub(crate) fn graph_unavailable(state: &ServerState) -> ToolResult {
    let reason = state
        .initialization_error()
        .unwrap_or("connection lost");
    McpErrorResponse::new(
        McpErrorCode::GraphUnavailable,
        format!("Graph database is not available: {reason}"),
    )
    .into()
}

/// Map a graph store failure onto an MCP error result.
pub(crate) fn graph_error(err: GraphError) -> ToolResult {
    match err {
        GraphError::EpisodeNotFound(uuid) => McpErrorResponse::new(
            McpErrorCode::EpisodeMissing,
            format!("Episode does not exist: {uuid}"),
        )
        .into(),
        GraphError::EdgeNotFound(uuid) => McpErrorResponse::new(
            McpErrorCode::EdgeMissing,
            format!("Entity edge does not exist: {uuid}"),
        )
        .into(),
        GraphError::Connect(reason) => McpErrorResponse::new(
            McpErrorCode::GraphUnavailable,
            format!("Graph database is not available: {reason}"),
        )
        .into(),
        other => {
            tracing::error!("graph operation failed: {other}");
            McpErrorResponse::new(McpErrorCode::QueryFailed, other.to_string()).into()
        }
    }
}

/// Normalize an optional client-supplied result limit.
pub(crate) fn result_limit(raw: Option<i64>, default: usize) -> Result<usize, ToolResult> {
    match raw {
        None => Ok(default),
        Some(n) if n >= 0 => Ok(n as usize),
        Some(n) => Err(McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Result limit must be non-negative, got {n}"),
        )
        .into()),
    }
}
