//! Named-entity extraction collaborators
//!
//! Entity presence is the cascade's intent signal: a question with at least
//! one extracted entity is treated as graph-native. Extraction is routed by
//! language — English goes to the cheap pattern extractor, everything else
//! to the LLM extractor — and the returned list must preserve
//! first-appearance order because the first entity selects the graph query
//! target.

pub mod llm;
pub mod pattern;

use async_trait::async_trait;

use crate::errors::Result;
use crate::language::Language;
use crate::models::Entity;

pub use llm::LlmExtractor;
pub use pattern::PatternExtractor;

/// Extracts named entities from text.
///
/// An empty list means "no intent signal", never an error condition.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, text: &str, language: Language) -> Result<Vec<Entity>>;
}

/// Language-aware extractor router.
///
/// English questions use the pattern extractor (fast, no network call);
/// Arabic and every other language use the LLM extractor.
pub struct SmartExtractor {
    pattern: PatternExtractor,
    llm: LlmExtractor,
}

impl SmartExtractor {
    #[must_use]
    pub fn new(pattern: PatternExtractor, llm: LlmExtractor) -> Self {
        Self { pattern, llm }
    }
}

#[async_trait]
impl EntityExtractor for SmartExtractor {
    async fn extract(&self, text: &str, language: Language) -> Result<Vec<Entity>> {
        if language.is_english() {
            return self.pattern.extract(text, language).await;
        }
        self.llm.extract(text, language).await
    }
}
