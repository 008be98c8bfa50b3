use std::time::Duration;

/// Default timeout for tool operations (30 seconds).
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Connection URI used when `NEO4J_URI` is unset.
const DEFAULT_NEO4J_URI: &str = "neo4j://127.0.0.1:7687";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Present means the external framework may run entity extraction;
    /// this server only reports the status, it never calls the API itself.
    pub openai_api_key: Option<String>,
    /// Namespace applied when a tool call carries no `group_id`.
    pub default_group_id: String,
    pub tool_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `NEO4J_URI` (optional, default `neo4j://127.0.0.1:7687`)
    /// - `NEO4J_USER` (optional, default `neo4j`)
    /// - `NEO4J_PASSWORD` (optional, default empty)
    /// - `OPENAI_API_KEY` (optional)
    /// - `GRAPHITI_GROUP_ID` (optional, default `default`)
    /// - `MEMORY_TOOL_TIMEOUT_SECS` (optional, default 30) — max seconds per tool call
    pub fn from_env() -> Result<Self, String> {
        let uri = env_or("NEO4J_URI", DEFAULT_NEO4J_URI);
        let user = env_or("NEO4J_USER", "neo4j");
        let password = env_or("NEO4J_PASSWORD", "");
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let default_group_id = env_or("GRAPHITI_GROUP_ID", "default");

        let tool_timeout_secs = match std::env::var("MEMORY_TOOL_TIMEOUT_SECS") {
            Ok(val) => parse_timeout_secs(&val)?,
            Err(_) => DEFAULT_TOOL_TIMEOUT_SECS,
        };

        Ok(Self {
            uri,
            user,
            password,
            openai_api_key,
            default_group_id,
            tool_timeout: Duration::from_secs(tool_timeout_secs),
        })
    }

    /// The effective group namespace for an optional client-supplied id.
    pub fn group_or_default(&self, group_id: Option<&str>) -> String {
        match group_id {
            Some(g) if !g.is_empty() => g.to_string(),
            _ => self.default_group_id.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// A zero timeout would fail every tool call, so it is rejected along with
/// non-numeric values.
fn parse_timeout_secs(val: &str) -> Result<u64, String> {
    match val.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err("MEMORY_TOOL_TIMEOUT_SECS must be a positive integer".to_string()),
    }
}
