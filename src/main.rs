use std::sync::Arc;

use tracing::{error, info, warn};

use mcp_memory_server::config::ServerConfig;
use mcp_memory_server::graph::{GraphStore, Neo4jGraph};
use mcp_memory_server::server::McpServer;
use mcp_memory_server::state::{GraphStatus, ServerState};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout is the protocol channel, so all diagnostics go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mcp-memory-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!("mcp-memory-server starting");
    info!("Neo4j URI: {}", config.uri);
    info!("Neo4j user: {}", config.user);
    info!(
        "OpenAI API key: {}",
        if config.openai_api_key.is_some() {
            "configured"
        } else {
            "not configured (entity extraction will be limited)"
        }
    );

    let graph = match Neo4jGraph::connect(&config).await {
        Ok(store) => {
            if let Err(e) = store.ensure_indices().await {
                // Index creation failing usually means restricted permissions;
                // searches may still work against pre-existing indices.
                warn!("could not ensure graph indices: {e}");
            }
            info!("connected to Neo4j");
            GraphStatus::Connected(Arc::new(store) as Arc<dyn GraphStore>)
        }
        Err(e) => {
            error!("Neo4j connection failed: {e}");
            error!("starting in disconnected mode; use test_neo4j_auth to diagnose");
            GraphStatus::Unavailable(e.to_string())
        }
    };

    let mut server = McpServer::new(ServerState::new(config, graph));
    if let Err(e) = server.run().await {
        error!("fatal error: {e}");
        std::process::exit(1);
    }
}
