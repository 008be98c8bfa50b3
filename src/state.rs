use std::sync::Arc;

use crate::config::ServerConfig;
use crate::graph::GraphStore;
use crate::ingest::IngestQueue;

/// Outcome of the startup connection attempt.
///
/// A failed connection does not abort the server: `initialize` and
/// `tools/list` still work, tool calls report the stored error, and
/// `test_neo4j_auth` turns it into a diagnosis.
pub enum GraphStatus {
    Connected(Arc<dyn GraphStore>),
    Unavailable(String),
}

/// Shared state threaded through the dispatch path.
pub struct ServerState {
    pub config: ServerConfig,
    pub graph: GraphStatus,
    pub ingest: IngestQueue,
}

impl ServerState {
    pub fn new(config: ServerConfig, graph: GraphStatus) -> Self {
        Self {
            config,
            graph,
            ingest: IngestQueue::new(),
        }
    }

    pub fn store(&self) -> Option<Arc<dyn GraphStore>> {
        match &self.graph {
            GraphStatus::Connected(store) => Some(Arc::clone(store)),
            GraphStatus::Unavailable(_) => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match &self.graph {
            GraphStatus::Connected(_) => "connected",
            GraphStatus::Unavailable(_) => "disconnected",
        }
    }

    pub fn initialization_error(&self) -> Option<&str> {
        match &self.graph {
            GraphStatus::Connected(_) => None,
            GraphStatus::Unavailable(reason) => Some(reason),
        }
    }
}
