use serde::{Deserialize, Serialize};

use crate::graph::EpisodeSource;

/// JSON-RPC 2.0 ID — may be a number or string per spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

/// Arguments for the `add_memory` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemoryParams {
    pub name: String,
    pub episode_body: String,
    #[serde(default)]
    pub source: EpisodeSource,
    pub group_id: Option<String>,
    #[serde(default)]
    pub source_description: String,
}

/// Arguments for the `search_memory_nodes` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchNodesParams {
    pub query: String,
    pub group_ids: Option<Vec<String>>,
    /// Accepts i64 so negative limits are rejected explicitly instead of
    /// failing u64 deserialization with an opaque message.
    pub max_nodes: Option<i64>,
}

/// Arguments for the `search_memory_facts` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchFactsParams {
    pub query: String,
    pub group_ids: Option<Vec<String>>,
    pub max_facts: Option<i64>,
}

/// Arguments for the `get_episodes` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GetEpisodesParams {
    pub group_id: Option<String>,
    pub last_n: Option<i64>,
}

/// Arguments for the uuid-addressed tools (`delete_episode`,
/// `get_entity_edge`, `delete_entity_edge`).
#[derive(Debug, Clone, Deserialize)]
pub struct UuidParams {
    pub uuid: String,
}
