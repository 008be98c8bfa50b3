use thiserror::Error;

/// Failures from the graph store layer.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph connection failed: {0}")]
    Connect(String),

    #[error("graph query failed: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("malformed graph record: {0}")]
    Decode(String),

    #[error("episode not found: {0}")]
    EpisodeNotFound(String),

    #[error("entity edge not found: {0}")]
    EdgeNotFound(String),
}
