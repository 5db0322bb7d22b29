//! Query intent classification
//!
//! Graph intent is decided by entity presence: extraction-based detection
//! generalizes across languages and phrasings where a hand-maintained
//! keyword trigger list would not. The router extracts entities once per
//! question and feeds the same list to both the intent decision and the
//! graph target selection, so the functions here take the extracted list
//! rather than re-running extraction.

use crate::models::Entity;

/// Arabic phrasings that tie a question to an ingested document ("this
/// report", "this document", "in this report", "the report title", "the
/// chapter", "the appendix").
const DOCUMENT_TRIGGERS_AR: &[&str] = &[
    "هذا التقرير",
    "هذه الوثيقة",
    "في هذا التقرير",
    "عنوان التقرير",
    "الفصل",
    "الملحق",
];

/// Is this question graph-native?
///
/// True iff extraction produced at least one entity.
#[must_use]
pub fn graph_intent(entities: &[Entity]) -> bool {
    !entities.is_empty()
}

/// Graph query target: name of the first extracted entity.
///
/// First-by-extraction-order wins; there is no ranking among multiple
/// extracted entities.
#[must_use]
pub fn graph_query_target(entities: &[Entity]) -> Option<&str> {
    entities.first().map(|e| e.name.as_str())
}

/// Does an Arabic question refer to "this document" context?
///
/// Meaningful only for Arabic questions; used exclusively to gate the
/// Branch A web fallback. A document-specific question must not spill to
/// open-web search, because its answer is scoped to an ingested document
/// and an external result would be misleading.
#[must_use]
pub fn is_document_specific(question: &str) -> bool {
    DOCUMENT_TRIGGERS_AR.iter().any(|t| question.contains(t))
}
