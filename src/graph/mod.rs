//! Graph store layer.
//!
//! `GraphStore` is the seam between the MCP tool handlers and the backing
//! database. Handlers only see the trait, so tests can run against an
//! in-memory store; `Neo4jGraph` is the production implementation.

pub mod error;
pub mod neo4j;
pub mod types;

pub use error::GraphError;
pub use neo4j::Neo4jGraph;
pub use types::{EntityEdge, EntityNode, Episode, EpisodeSource};

use async_trait::async_trait;

/// Operations the memory tools need from the backing graph database.
///
/// Entity extraction and hybrid ranking live in the external framework and
/// the database; this trait only covers the pass-through surface.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Read-only connectivity probe. Must not mutate graph state.
    async fn verify(&self) -> Result<(), GraphError>;

    /// Create uuid and fulltext indices. Idempotent.
    async fn ensure_indices(&self) -> Result<(), GraphError>;

    /// Persist one episode.
    async fn add_episode(&self, episode: &Episode) -> Result<(), GraphError>;

    /// Fulltext search over entity names and summaries, best score first.
    async fn search_nodes(
        &self,
        query: &str,
        group_ids: &[String],
        limit: usize,
    ) -> Result<Vec<EntityNode>, GraphError>;

    /// Fulltext search over relationship names and facts, best score first.
    async fn search_facts(
        &self,
        query: &str,
        group_ids: &[String],
        limit: usize,
    ) -> Result<Vec<EntityEdge>, GraphError>;

    /// Last `n` episodes for a group, oldest first.
    async fn recent_episodes(&self, group_id: &str, n: usize) -> Result<Vec<Episode>, GraphError>;

    /// Delete an episode by uuid. Unknown uuid is `EpisodeNotFound`.
    async fn delete_episode(&self, uuid: &str) -> Result<(), GraphError>;

    /// Fetch an entity edge by uuid. Unknown uuid is `EdgeNotFound`.
    async fn entity_edge(&self, uuid: &str) -> Result<EntityEdge, GraphError>;

    /// Delete an entity edge by uuid. Unknown uuid is `EdgeNotFound`.
    async fn delete_entity_edge(&self, uuid: &str) -> Result<(), GraphError>;

    /// Remove every node and relationship, then rebuild indices.
    async fn clear(&self) -> Result<(), GraphError>;
}
