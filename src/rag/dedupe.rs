//! Identity-key deduplication for retrieved passages

use std::collections::HashSet;

use crate::models::Chunk;

/// Remove duplicate chunks by identity key, keeping first occurrences.
///
/// Pure and order-stable: the first chunk seen for each
/// `(document_id, page_number, chunk_id)` triple survives in its original
/// relative position, regardless of text content. Runs in linear time.
///
/// Applied only to vector-search results; graph rows are already distinct
/// (document, chunk) matches from a structured query.
#[must_use]
pub fn dedupe_chunks(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let key = (
            chunk.document_id.clone(),
            chunk.page_number,
            chunk.chunk_id.clone(),
        );
        if seen.insert(key) {
            unique.push(chunk);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(doc: &str, page: i32, id: &str, text: &str) -> Chunk {
        Chunk {
            document_id: doc.to_string(),
            page_number: page,
            chunk_id: id.to_string(),
            text: text.to_string(),
            language: None,
        }
    }

    #[test]
    fn test_removes_duplicates_by_identity_key() {
        let chunks = vec![
            chunk("d1", 1, "c1", "original"),
            chunk("d1", 1, "c1", "different text, same identity"),
            chunk("d1", 2, "c1", "different page"),
        ];

        let unique = dedupe_chunks(chunks);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].text, "original");
        assert_eq!(unique[1].page_number, 2);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let chunks = vec![
            chunk("d2", 1, "c1", "a"),
            chunk("d1", 1, "c1", "b"),
            chunk("d2", 1, "c1", "c"),
            chunk("d3", 1, "c1", "d"),
        ];

        let unique = dedupe_chunks(chunks);
        let docs: Vec<_> = unique.iter().map(|c| c.document_id.as_str()).collect();
        assert_eq!(docs, vec!["d2", "d1", "d3"]);
    }

    #[test]
    fn test_idempotent() {
        let chunks = vec![
            chunk("d1", 1, "c1", "a"),
            chunk("d1", 1, "c2", "b"),
            chunk("d1", 1, "c1", "a again"),
        ];

        let once = dedupe_chunks(chunks);
        let twice = dedupe_chunks(once.clone());

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.identity_key(), b.identity_key());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe_chunks(Vec::new()).is_empty());
    }
}
