//! MCP server for knowledge-graph memory.
//!
//! Exposes episode ingestion, node/fact search, and graph maintenance tools
//! over JSON-RPC 2.0 stdio transport, compatible with any MCP-aware AI agent.
//! Storage and query execution live in a Neo4j database; this crate is the
//! protocol surface in front of it.

pub mod catalog;
pub mod config;
pub mod graph;
pub mod handlers;
pub mod ingest;
pub mod protocol;
pub mod server;
pub mod state;
