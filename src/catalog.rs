//! Tool catalog.
//!
//! Single source of truth for tool names, descriptions, and input schemas.
//! `tools/list` serializes it, and `tools/call` validates arguments against
//! the declared schema before any handler runs, so every tool rejects calls
//! missing a required argument with a message naming the violation.

use std::sync::OnceLock;

use jsonschema::{validator_for, Validator};
use serde_json::{json, Value};

pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    validator: Validator,
}

impl ToolSpec {
    fn new(name: &'static str, description: &'static str, input_schema: Value) -> Self {
        let validator = validator_for(&input_schema)
            .expect("static tool schema must compile");
        Self {
            name,
            description,
            input_schema,
            validator,
        }
    }
}

pub fn catalog() -> &'static [ToolSpec] {
    static CATALOG: OnceLock<Vec<ToolSpec>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    catalog().iter().find(|t| t.name == name)
}

/// Validate tool arguments against the tool's declared input schema.
///
/// Returns all violations joined into one message so clients see every
/// missing field at once.
pub fn validate_arguments(spec: &ToolSpec, arguments: &Value) -> Result<(), String> {
    let errors: Vec<String> = spec
        .validator
        .iter_errors(arguments)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Invalid arguments for {}: {}",
            spec.name,
            errors.join("; ")
        ))
    }
}

/// The `tools` array for `tools/list`.
pub fn tools_json() -> Value {
    let tools: Vec<Value> = catalog()
        .iter()
        .map(|t| {
            json!({
                "name": t.name,
                "description": t.description,
                "inputSchema": t.input_schema,
            })
        })
        .collect();
    Value::Array(tools)
}

fn build_catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "add_memory",
            "Add an episode/memory to the knowledge graph. This is the primary way to add information.",
            json!({
                "type": "object",
                "required": ["name", "episode_body"],
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name of the episode"
                    },
                    "episode_body": {
                        "type": "string",
                        "description": "Content of the episode (text, message, or JSON)"
                    },
                    "group_id": {
                        "type": "string",
                        "description": "Optional group ID for organizing data"
                    },
                    "source": {
                        "type": "string",
                        "enum": ["text", "message", "json"],
                        "description": "Source type (default: text)"
                    },
                    "source_description": {
                        "type": "string",
                        "description": "Optional description of the source"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "search_memory_nodes",
            "Search for nodes (entities) in the knowledge graph",
            json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "group_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Optional list of group IDs to filter results"
                    },
                    "max_nodes": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum number of nodes to return (default: 10)"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "search_memory_facts",
            "Search for facts (relationships) in the knowledge graph",
            json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "group_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Optional list of group IDs to filter results"
                    },
                    "max_facts": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum number of facts to return (default: 10)"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "get_episodes",
            "Get recent episodes for a group",
            json!({
                "type": "object",
                "required": [],
                "properties": {
                    "group_id": {
                        "type": "string",
                        "description": "Group ID to retrieve episodes from"
                    },
                    "last_n": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Number of recent episodes to retrieve (default: 10)"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "delete_episode",
            "Delete an episode from the knowledge graph",
            json!({
                "type": "object",
                "required": ["uuid"],
                "properties": {
                    "uuid": {
                        "type": "string",
                        "description": "UUID of the episode to delete"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "delete_entity_edge",
            "Delete an entity edge (fact) from the knowledge graph",
            json!({
                "type": "object",
                "required": ["uuid"],
                "properties": {
                    "uuid": {
                        "type": "string",
                        "description": "UUID of the entity edge to delete"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "get_entity_edge",
            "Get an entity edge by UUID",
            json!({
                "type": "object",
                "required": ["uuid"],
                "properties": {
                    "uuid": {
                        "type": "string",
                        "description": "UUID of the entity edge to retrieve"
                    }
                }
            }),
        ),
        ToolSpec::new(
            "clear_graph",
            "Clear all data from the knowledge graph (DESTRUCTIVE)",
            json!({
                "type": "object",
                "required": [],
                "properties": {}
            }),
        ),
        ToolSpec::new(
            "test_neo4j_auth",
            "Test Neo4j connectivity and credentials without modifying the graph",
            json!({
                "type": "object",
                "required": [],
                "properties": {}
            }),
        ),
    ]
}
