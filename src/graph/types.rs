use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an episode body should be interpreted by downstream extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeSource {
    #[default]
    Text,
    Message,
    Json,
}

impl EpisodeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Message => "message",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for EpisodeSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "message" => Ok(Self::Message),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown episode source: {other}")),
        }
    }
}

/// A unit of memory content ingested into the knowledge graph.
///
/// Stored as an `Episodic` node. `valid_at` is the reference time of the
/// content; `created_at` is when the record was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub uuid: Uuid,
    pub name: String,
    pub group_id: String,
    pub source: EpisodeSource,
    pub source_description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub valid_at: DateTime<Utc>,
}

impl Episode {
    /// Build a fresh episode with a v4 UUID and the current UTC time as
    /// both creation and reference time.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        source: EpisodeSource,
        source_description: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            group_id: group_id.into(),
            source,
            source_description: source_description.into(),
            content: content.into(),
            created_at: now,
            valid_at: now,
        }
    }
}

/// An entity node as returned by node search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    pub uuid: String,
    pub name: String,
    pub summary: String,
    pub labels: Vec<String>,
    pub group_id: String,
    pub created_at: DateTime<Utc>,
}

/// A relationship record (fact) between two entity nodes.
///
/// Embedding vectors are never part of this type; they stay inside the
/// database, matching what clients are allowed to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEdge {
    pub uuid: String,
    pub name: String,
    pub fact: String,
    pub group_id: String,
    pub source_node_uuid: String,
    pub target_node_uuid: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_at: Option<DateTime<Utc>>,
}
