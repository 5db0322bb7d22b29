//! Core data model shared across the retrieval cascade

use serde::Deserialize;
use serde::Serialize;

/// A retrieved passage from either the vector store or the graph store.
///
/// Identity is the `(document_id, page_number, chunk_id)` triple; two chunks
/// with the same triple are the same passage regardless of text content.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chunk {
    pub document_id: String,
    pub page_number: i32,
    pub chunk_id: String,
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl Chunk {
    /// Identity key used for deduplication.
    #[must_use]
    pub fn identity_key(&self) -> (&str, i32, &str) {
        (&self.document_id, self.page_number, &self.chunk_id)
    }
}

/// A named entity produced by an extraction collaborator.
///
/// Only `name` is load-bearing for the orchestrator; extractors must return
/// entities in first-appearance order because index 0 selects the graph
/// query target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub entity_type: String,
    pub source_label: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Provenance tag identifying which knowledge source produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Knowledge {
    #[serde(rename = "internal (graph)")]
    Graph,
    #[serde(rename = "internal (vector)")]
    Vector,
    #[serde(rename = "internal (vector-fallback)")]
    VectorFallback,
    #[serde(rename = "online")]
    Online,
}

impl std::fmt::Display for Knowledge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Graph => "internal (graph)",
            Self::Vector => "internal (vector)",
            Self::VectorFallback => "internal (vector-fallback)",
            Self::Online => "online",
        };
        write!(f, "{tag}")
    }
}

/// What backs the returned answer: retrieved passages for internal
/// knowledge, an external link for online knowledge.
///
/// Serialized untagged so internal answers carry a chunk array and online
/// answers carry a bare link string on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sources {
    Chunks(Vec<Chunk>),
    Link(String),
}

impl Sources {
    /// Number of backing passages (1 for an external link).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Chunks(chunks) => chunks.len(),
            Self::Link(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The orchestrator's sole output type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub sources: Sources,
    pub knowledge: Knowledge,
}

impl Answer {
    /// Get a formatted string representation
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Answer:\n{}\n\n", self.answer));
        output.push_str(&format!("Knowledge: {}\n", self.knowledge));

        match &self.sources {
            Sources::Link(link) => {
                output.push_str(&format!("Source: {link}\n"));
            }
            Sources::Chunks(chunks) => {
                output.push_str(&format!("Sources ({} passages):\n", chunks.len()));
                for (idx, chunk) in chunks.iter().enumerate().take(5) {
                    output.push_str(&format!(
                        "  {}. doc {} / page {} / chunk {}\n",
                        idx + 1,
                        chunk.document_id,
                        chunk.page_number,
                        chunk.chunk_id
                    ));
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_tags_serialize_verbatim() {
        assert_eq!(
            serde_json::to_string(&Knowledge::Graph).unwrap(),
            "\"internal (graph)\""
        );
        assert_eq!(
            serde_json::to_string(&Knowledge::Vector).unwrap(),
            "\"internal (vector)\""
        );
        assert_eq!(
            serde_json::to_string(&Knowledge::VectorFallback).unwrap(),
            "\"internal (vector-fallback)\""
        );
        assert_eq!(serde_json::to_string(&Knowledge::Online).unwrap(), "\"online\"");
    }

    #[test]
    fn test_sources_wire_shape() {
        let link = Sources::Link("https://example.com/result".to_string());
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            "\"https://example.com/result\""
        );

        let chunks = Sources::Chunks(vec![]);
        assert_eq!(serde_json::to_string(&chunks).unwrap(), "[]");
    }

    #[test]
    fn test_chunk_identity_key_ignores_text() {
        let a = Chunk {
            document_id: "doc-1".to_string(),
            page_number: 3,
            chunk_id: "c-7".to_string(),
            text: "first rendering".to_string(),
            language: None,
        };
        let b = Chunk {
            text: "second rendering".to_string(),
            ..a.clone()
        };
        assert_eq!(a.identity_key(), b.identity_key());
    }
}
