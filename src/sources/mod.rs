//! Knowledge-source collaborators behind the retrieval cascade
//!
//! Each source is an opaque query interface: the graph store answers
//! entity-name lookups, the vector store answers semantic similarity
//! queries, and the web source answers open-web searches. The orchestrator
//! composes them; it never mutates any of them.

pub mod graph;
pub mod vector;
pub mod web;

use async_trait::async_trait;

use crate::errors::Result;
use crate::language::Language;
use crate::models::Chunk;

pub use graph::Neo4jGraphSource;
pub use vector::PgVectorSource;
pub use web::OrganicResult;
pub use web::SerpWebSource;
pub use web::WebSearchResponse;

/// Structured lookup over the knowledge graph.
///
/// A `None` or empty entity name must yield an empty list, not an error.
#[async_trait]
pub trait GraphSource: Send + Sync {
    async fn query(&self, entity_name: Option<&str>) -> Result<Vec<Chunk>>;
}

/// Semantic similarity search over ingested passages.
///
/// Returned chunks must carry populated identity keys; no ordering is
/// guaranteed and the caller relies on deduplication only.
#[async_trait]
pub trait VectorSource: Send + Sync {
    async fn search(&self, question: &str, language: Language) -> Result<Vec<Chunk>>;
}

/// Open-web search.
#[async_trait]
pub trait WebSource: Send + Sync {
    async fn search(&self, question: &str) -> Result<WebSearchResponse>;
}
