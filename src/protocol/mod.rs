pub mod request;
pub mod response;

pub use request::{
    AddMemoryParams, GetEpisodesParams, JsonRpcRequest, RpcId, SearchFactsParams,
    SearchNodesParams, ToolCallParams, UuidParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ToolResult,
    ToolResultContent,
};
