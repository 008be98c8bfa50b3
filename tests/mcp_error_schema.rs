use jsonschema::validator_for;
use serde_json::Value;

use mcp_memory_server::protocol::{McpErrorCode, McpErrorResponse};

#[test]
fn golden_mcp_error_schema_validation() {
    // 1. Build a canonical error response
    let response = McpErrorResponse::new(
        McpErrorCode::EpisodeMissing,
        "Episode does not exist",
    );

    let json_str = serde_json::to_string_pretty(&response).unwrap();
    let json_value: Value = serde_json::from_str(&json_str).unwrap();

    // 2. Schema (v0) — frozen
    let schema_str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "MCP Error Response v0",
  "type": "object",
  "required": ["error"],
  "additionalProperties": false,
  "properties": {
    "error": {
      "type": "object",
      "required": ["code", "message"],
      "additionalProperties": false,
      "properties": {
        "code": {
          "type": "string",
          "enum": [
            "graph_unavailable",
            "episode_missing",
            "edge_missing",
            "invalid_arguments",
            "query_failed",
            "internal_error"
          ]
        },
        "message": {
          "type": "string",
          "minLength": 1
        }
      }
    }
  }
}"#;

    let schema_json: Value = serde_json::from_str(schema_str).unwrap();
    let validator = validator_for(&schema_json).unwrap();

    // 3. Validate against schema
    assert!(validator.is_valid(&json_value), "MCP error JSON must satisfy v0 schema");

    // 4. Golden snapshot (byte-identical, stable)
    let expected = r#"{
  "error": {
    "code": "episode_missing",
    "message": "Episode does not exist"
  }
}"#;

    assert_eq!(json_str.trim(), expected.trim(), "MCP error JSON snapshot mismatch");
}

#[test]
fn every_code_maps_to_a_json_rpc_code() {
    use mcp_memory_server::protocol::JsonRpcError;

    let caller_faults = [
        McpErrorCode::EpisodeMissing,
        McpErrorCode::EdgeMissing,
        McpErrorCode::InvalidArguments,
    ];
    for code in caller_faults {
        assert_eq!(code.json_rpc_code(), -32602);
    }

    let server_faults = [
        McpErrorCode::GraphUnavailable,
        McpErrorCode::QueryFailed,
        McpErrorCode::InternalError,
    ];
    for code in server_faults {
        assert_eq!(code.json_rpc_code(), -32603);
    }

    // Conversion carries the structured error in `data`.
    let rpc: JsonRpcError = McpErrorResponse::canonical(McpErrorCode::QueryFailed).into();
    assert_eq!(rpc.code, -32603);
    let data = rpc.data.unwrap();
    assert_eq!(data["error"]["code"], serde_json::json!("query_failed"));
}
