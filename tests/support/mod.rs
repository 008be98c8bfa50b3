//! Shared test fixtures: an in-memory `GraphStore` and state builders.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use mcp_memory_server::config::ServerConfig;
use mcp_memory_server::graph::{EntityEdge, EntityNode, Episode, GraphError, GraphStore};
use mcp_memory_server::state::{GraphStatus, ServerState};

/// In-memory graph store recording every mutation, so tests can assert on
/// exactly what the handlers did.
#[derive(Default)]
pub struct FakeGraph {
    pub episodes: Mutex<Vec<Episode>>,
    pub nodes: Mutex<Vec<EntityNode>>,
    pub edges: Mutex<Vec<EntityEdge>>,
    pub verify_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
    /// When set, `verify` fails with this message.
    pub verify_failure: Mutex<Option<String>>,
    /// Artificial latency applied to `clear`, for timeout tests.
    pub clear_delay: Mutex<Option<Duration>>,
}

impl FakeGraph {
    pub fn episode_count(&self) -> usize {
        self.episodes.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphStore for FakeGraph {
    async fn verify(&self) -> Result<(), GraphError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match self.verify_failure.lock().unwrap().clone() {
            Some(message) => Err(GraphError::Connect(message)),
            None => Ok(()),
        }
    }

    async fn ensure_indices(&self) -> Result<(), GraphError> {
        Ok(())
    }

    async fn add_episode(&self, episode: &Episode) -> Result<(), GraphError> {
        self.episodes.lock().unwrap().push(episode.clone());
        Ok(())
    }

    async fn search_nodes(
        &self,
        query: &str,
        group_ids: &[String],
        limit: usize,
    ) -> Result<Vec<EntityNode>, GraphError> {
        let nodes = self.nodes.lock().unwrap();
        Ok(nodes
            .iter()
            .filter(|n| group_ids.contains(&n.group_id))
            .filter(|n| n.name.contains(query) || n.summary.contains(query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_facts(
        &self,
        query: &str,
        group_ids: &[String],
        limit: usize,
    ) -> Result<Vec<EntityEdge>, GraphError> {
        let edges = self.edges.lock().unwrap();
        Ok(edges
            .iter()
            .filter(|e| group_ids.contains(&e.group_id))
            .filter(|e| e.name.contains(query) || e.fact.contains(query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent_episodes(&self, group_id: &str, n: usize) -> Result<Vec<Episode>, GraphError> {
        let episodes = self.episodes.lock().unwrap();
        let matching: Vec<Episode> = episodes
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        let start = matching.len().saturating_sub(n);
        Ok(matching[start..].to_vec())
    }

    async fn delete_episode(&self, uuid: &str) -> Result<(), GraphError> {
        let mut episodes = self.episodes.lock().unwrap();
        let before = episodes.len();
        episodes.retain(|e| e.uuid.to_string() != uuid);
        if episodes.len() == before {
            return Err(GraphError::EpisodeNotFound(uuid.to_string()));
        }
        Ok(())
    }

    async fn entity_edge(&self, uuid: &str) -> Result<EntityEdge, GraphError> {
        let edges = self.edges.lock().unwrap();
        edges
            .iter()
            .find(|e| e.uuid == uuid)
            .cloned()
            .ok_or_else(|| GraphError::EdgeNotFound(uuid.to_string()))
    }

    async fn delete_entity_edge(&self, uuid: &str) -> Result<(), GraphError> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|e| e.uuid != uuid);
        if edges.len() == before {
            return Err(GraphError::EdgeNotFound(uuid.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), GraphError> {
        let delay = *self.clear_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.episodes.lock().unwrap().clear();
        self.nodes.lock().unwrap().clear();
        self.edges.lock().unwrap().clear();
        Ok(())
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        uri: "neo4j://127.0.0.1:7687".into(),
        user: "neo4j".into(),
        password: String::new(),
        openai_api_key: None,
        default_group_id: "default".into(),
        tool_timeout: Duration::from_secs(5),
    }
}

pub fn connected_state(fake: &Arc<FakeGraph>) -> ServerState {
    ServerState::new(
        test_config(),
        GraphStatus::Connected(Arc::clone(fake) as Arc<dyn GraphStore>),
    )
}

pub fn disconnected_state(reason: &str) -> ServerState {
    ServerState::new(test_config(), GraphStatus::Unavailable(reason.into()))
}

pub fn sample_node(uuid: &str, name: &str, summary: &str, group_id: &str) -> EntityNode {
    EntityNode {
        uuid: uuid.into(),
        name: name.into(),
        summary: summary.into(),
        labels: vec!["Entity".into()],
        group_id: group_id.into(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn sample_edge(uuid: &str, name: &str, fact: &str, group_id: &str) -> EntityEdge {
    EntityEdge {
        uuid: uuid.into(),
        name: name.into(),
        fact: fact.into(),
        group_id: group_id.into(),
        source_node_uuid: "node-a".into(),
        target_node_uuid: "node-b".into(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        valid_at: None,
        invalid_at: None,
    }
}
