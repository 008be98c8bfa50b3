use async_trait::async_trait;
use chrono::{DateTime, Utc};
use neo4rs::{query, ConfigBuilder, Graph, Row};
use uuid::Uuid;

use crate::config::ServerConfig;

use super::types::{EntityEdge, EntityNode, Episode, EpisodeSource};
use super::{GraphError, GraphStore};

/// Fulltext index over entity names and summaries (framework convention).
const NODE_FULLTEXT_INDEX: &str = "node_name_and_summary";
/// Fulltext index over relationship names and facts (framework convention).
const EDGE_FULLTEXT_INDEX: &str = "edge_name_and_fact";

/// Production `GraphStore` backed by a Neo4j bolt connection.
///
/// Timestamps are stored as RFC 3339 strings so records stay readable from
/// any driver and survive databases without temporal type support.
pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    /// Open a bolt connection using the configured URI and credentials.
    pub async fn connect(config: &ServerConfig) -> Result<Self, GraphError> {
        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .build()
            .map_err(|e| GraphError::Connect(e.to_string()))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| GraphError::Connect(e.to_string()))?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for Neo4jGraph {
    async fn verify(&self) -> Result<(), GraphError> {
        let mut rows = self.graph.execute(query("RETURN 1 AS ok")).await?;
        rows.next().await?;
        Ok(())
    }

    async fn ensure_indices(&self) -> Result<(), GraphError> {
        let node_fulltext = format!(
            "CREATE FULLTEXT INDEX {NODE_FULLTEXT_INDEX} IF NOT EXISTS \
             FOR (n:Entity) ON EACH [n.name, n.summary]"
        );
        let edge_fulltext = format!(
            "CREATE FULLTEXT INDEX {EDGE_FULLTEXT_INDEX} IF NOT EXISTS \
             FOR ()-[r:RELATES_TO]-() ON EACH [r.name, r.fact]"
        );
        let statements = [
            "CREATE INDEX episodic_uuid IF NOT EXISTS FOR (e:Episodic) ON (e.uuid)",
            "CREATE INDEX episodic_group_id IF NOT EXISTS FOR (e:Episodic) ON (e.group_id)",
            "CREATE INDEX entity_uuid IF NOT EXISTS FOR (n:Entity) ON (n.uuid)",
            node_fulltext.as_str(),
            edge_fulltext.as_str(),
        ];

        for statement in statements {
            self.graph.run(query(statement)).await?;
        }
        Ok(())
    }

    async fn add_episode(&self, episode: &Episode) -> Result<(), GraphError> {
        let q = query(
            "CREATE (e:Episodic {uuid: $uuid, name: $name, group_id: $group_id, \
             source: $source, source_description: $source_description, \
             content: $content, created_at: $created_at, valid_at: $valid_at})",
        )
        .param("uuid", episode.uuid.to_string())
        .param("name", episode.name.clone())
        .param("group_id", episode.group_id.clone())
        .param("source", episode.source.as_str())
        .param("source_description", episode.source_description.clone())
        .param("content", episode.content.clone())
        .param("created_at", episode.created_at.to_rfc3339())
        .param("valid_at", episode.valid_at.to_rfc3339());

        self.graph.run(q).await?;
        Ok(())
    }

    async fn search_nodes(
        &self,
        search: &str,
        group_ids: &[String],
        limit: usize,
    ) -> Result<Vec<EntityNode>, GraphError> {
        let q = query(
            "CALL db.index.fulltext.queryNodes($index, $search) YIELD node, score \
             WHERE node.group_id IN $group_ids \
             RETURN node.uuid AS uuid, node.name AS name, \
                    coalesce(node.summary, '') AS summary, \
                    labels(node) AS labels, node.group_id AS group_id, \
                    coalesce(node.created_at, '1970-01-01T00:00:00Z') AS created_at \
             ORDER BY score DESC LIMIT $limit",
        )
        .param("index", NODE_FULLTEXT_INDEX)
        .param("search", search)
        .param("group_ids", group_ids.to_vec())
        .param("limit", limit as i64);

        let mut rows = self.graph.execute(q).await?;
        let mut nodes = Vec::new();
        while let Some(row) = rows.next().await? {
            nodes.push(decode_entity_node(&row)?);
        }
        Ok(nodes)
    }

    async fn search_facts(
        &self,
        search: &str,
        group_ids: &[String],
        limit: usize,
    ) -> Result<Vec<EntityEdge>, GraphError> {
        let q = query(
            "CALL db.index.fulltext.queryRelationships($index, $search) \
             YIELD relationship AS rel, score \
             WHERE rel.group_id IN $group_ids \
             RETURN rel.uuid AS uuid, coalesce(rel.name, '') AS name, \
                    coalesce(rel.fact, '') AS fact, rel.group_id AS group_id, \
                    startNode(rel).uuid AS source_node_uuid, \
                    endNode(rel).uuid AS target_node_uuid, \
                    coalesce(rel.created_at, '1970-01-01T00:00:00Z') AS created_at, \
                    rel.valid_at AS valid_at, rel.invalid_at AS invalid_at \
             ORDER BY score DESC LIMIT $limit",
        )
        .param("index", EDGE_FULLTEXT_INDEX)
        .param("search", search)
        .param("group_ids", group_ids.to_vec())
        .param("limit", limit as i64);

        let mut rows = self.graph.execute(q).await?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next().await? {
            edges.push(decode_entity_edge(&row)?);
        }
        Ok(edges)
    }

    async fn recent_episodes(&self, group_id: &str, n: usize) -> Result<Vec<Episode>, GraphError> {
        let q = query(
            "MATCH (e:Episodic {group_id: $group_id}) \
             RETURN e.uuid AS uuid, e.name AS name, e.group_id AS group_id, \
                    coalesce(e.source, 'text') AS source, \
                    coalesce(e.source_description, '') AS source_description, \
                    coalesce(e.content, '') AS content, \
                    coalesce(e.created_at, '1970-01-01T00:00:00Z') AS created_at, \
                    coalesce(e.valid_at, e.created_at, '1970-01-01T00:00:00Z') AS valid_at \
             ORDER BY e.valid_at DESC LIMIT $limit",
        )
        .param("group_id", group_id)
        .param("limit", n as i64);

        let mut rows = self.graph.execute(q).await?;
        let mut episodes = Vec::new();
        while let Some(row) = rows.next().await? {
            episodes.push(decode_episode(&row)?);
        }
        // Query returns newest first; callers expect chronological order.
        episodes.reverse();
        Ok(episodes)
    }

    async fn delete_episode(&self, uuid: &str) -> Result<(), GraphError> {
        let q = query("MATCH (e:Episodic {uuid: $uuid}) RETURN count(e) AS found")
            .param("uuid", uuid);
        let mut rows = self.graph.execute(q).await?;
        let found = match rows.next().await? {
            Some(row) => get_i64(&row, "found")?,
            None => 0,
        };
        if found == 0 {
            return Err(GraphError::EpisodeNotFound(uuid.to_string()));
        }

        let q = query("MATCH (e:Episodic {uuid: $uuid}) DETACH DELETE e").param("uuid", uuid);
        self.graph.run(q).await?;
        Ok(())
    }

    async fn entity_edge(&self, uuid: &str) -> Result<EntityEdge, GraphError> {
        let q = query(
            "MATCH (a)-[rel:RELATES_TO {uuid: $uuid}]->(b) \
             RETURN rel.uuid AS uuid, coalesce(rel.name, '') AS name, \
                    coalesce(rel.fact, '') AS fact, \
                    coalesce(rel.group_id, '') AS group_id, \
                    a.uuid AS source_node_uuid, b.uuid AS target_node_uuid, \
                    coalesce(rel.created_at, '1970-01-01T00:00:00Z') AS created_at, \
                    rel.valid_at AS valid_at, rel.invalid_at AS invalid_at \
             LIMIT 1",
        )
        .param("uuid", uuid);

        let mut rows = self.graph.execute(q).await?;
        match rows.next().await? {
            Some(row) => decode_entity_edge(&row),
            None => Err(GraphError::EdgeNotFound(uuid.to_string())),
        }
    }

    async fn delete_entity_edge(&self, uuid: &str) -> Result<(), GraphError> {
        let q = query("MATCH ()-[rel:RELATES_TO {uuid: $uuid}]->() RETURN count(rel) AS found")
            .param("uuid", uuid);
        let mut rows = self.graph.execute(q).await?;
        let found = match rows.next().await? {
            Some(row) => get_i64(&row, "found")?,
            None => 0,
        };
        if found == 0 {
            return Err(GraphError::EdgeNotFound(uuid.to_string()));
        }

        let q = query("MATCH ()-[rel:RELATES_TO {uuid: $uuid}]->() DELETE rel").param("uuid", uuid);
        self.graph.run(q).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), GraphError> {
        self.graph.run(query("MATCH (n) DETACH DELETE n")).await?;
        self.ensure_indices().await
    }
}

fn decode_entity_node(row: &Row) -> Result<EntityNode, GraphError> {
    Ok(EntityNode {
        uuid: get_string(row, "uuid")?,
        name: get_string(row, "name")?,
        summary: get_string(row, "summary")?,
        labels: row
            .get::<Vec<String>>("labels")
            .map_err(|e| GraphError::Decode(format!("labels: {e}")))?,
        group_id: get_string(row, "group_id")?,
        created_at: parse_timestamp(&get_string(row, "created_at")?)?,
    })
}

fn decode_entity_edge(row: &Row) -> Result<EntityEdge, GraphError> {
    Ok(EntityEdge {
        uuid: get_string(row, "uuid")?,
        name: get_string(row, "name")?,
        fact: get_string(row, "fact")?,
        group_id: get_string(row, "group_id")?,
        source_node_uuid: get_string(row, "source_node_uuid")?,
        target_node_uuid: get_string(row, "target_node_uuid")?,
        created_at: parse_timestamp(&get_string(row, "created_at")?)?,
        valid_at: parse_optional_timestamp(row, "valid_at")?,
        invalid_at: parse_optional_timestamp(row, "invalid_at")?,
    })
}

fn decode_episode(row: &Row) -> Result<Episode, GraphError> {
    let uuid_str = get_string(row, "uuid")?;
    let uuid = Uuid::parse_str(&uuid_str)
        .map_err(|e| GraphError::Decode(format!("episode uuid {uuid_str:?}: {e}")))?;
    let source_str = get_string(row, "source")?;
    let source: EpisodeSource = source_str.parse().map_err(GraphError::Decode)?;

    Ok(Episode {
        uuid,
        name: get_string(row, "name")?,
        group_id: get_string(row, "group_id")?,
        source,
        source_description: get_string(row, "source_description")?,
        content: get_string(row, "content")?,
        created_at: parse_timestamp(&get_string(row, "created_at")?)?,
        valid_at: parse_timestamp(&get_string(row, "valid_at")?)?,
    })
}

fn get_string(row: &Row, key: &str) -> Result<String, GraphError> {
    row.get::<String>(key)
        .map_err(|e| GraphError::Decode(format!("{key}: {e}")))
}

fn get_i64(row: &Row, key: &str) -> Result<i64, GraphError> {
    row.get::<i64>(key)
        .map_err(|e| GraphError::Decode(format!("{key}: {e}")))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, GraphError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GraphError::Decode(format!("timestamp {raw:?}: {e}")))
}

fn parse_optional_timestamp(row: &Row, key: &str) -> Result<Option<DateTime<Utc>>, GraphError> {
    let raw = row
        .get::<Option<String>>(key)
        .map_err(|e| GraphError::Decode(format!("{key}: {e}")))?;
    match raw {
        Some(s) => parse_timestamp(&s).map(Some),
        None => Ok(None),
    }
}
