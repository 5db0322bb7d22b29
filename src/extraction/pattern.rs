//! Fast rule-based entity extraction for English questions

use async_trait::async_trait;

use crate::errors::Result;
use crate::language::Language;
use crate::models::Entity;

use super::EntityExtractor;

/// Leading question words and function words that start sentences
/// capitalized without naming anything.
const STOPWORDS: &[&str] = &[
    "what", "which", "who", "whom", "whose", "where", "when", "why", "how",
    "is", "are", "was", "were", "do", "does", "did", "can", "could", "will",
    "would", "should", "shall", "may", "might", "the", "a", "an", "in", "on",
    "of", "for", "to", "and", "or", "list", "show", "tell", "give", "find",
    "describe", "explain", "compare", "summarize", "please",
];

/// Measurement and control vocabulary that reads as capitalized jargon in
/// technical documents but never names a graph entity.
const SIGNAL_KEYWORDS: &[&str] = &[
    "velocity", "length", "force", "feedback", "bias", "signal", "control",
    "error",
];

/// Capitalized-span entity extractor.
///
/// Groups consecutive capitalized words into candidate names, then applies
/// the same validity filters the ingestion side uses. Within-question
/// duplicates collapse to the first occurrence, preserving appearance order.
pub struct PatternExtractor;

impl PatternExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn normalize(name: &str) -> String {
        name.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn is_valid(name: &str) -> bool {
        let lower = name.to_lowercase();

        if lower.len() < 4 {
            return false;
        }

        if SIGNAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return false;
        }

        if lower.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }

        true
    }

    fn extract_spans(text: &str) -> Vec<String> {
        let mut spans = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }

            let capitalized = word.chars().next().is_some_and(char::is_uppercase);
            let stopword = STOPWORDS.contains(&word.to_lowercase().as_str());

            if capitalized && !stopword {
                current.push(word);
            } else if !current.is_empty() {
                spans.push(current.join(" "));
                current.clear();
            }
        }

        if !current.is_empty() {
            spans.push(current.join(" "));
        }

        spans
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityExtractor for PatternExtractor {
    async fn extract(&self, text: &str, language: Language) -> Result<Vec<Entity>> {
        let mut seen = std::collections::HashSet::new();
        let mut entities = Vec::new();

        for span in Self::extract_spans(text) {
            let name = Self::normalize(&span);

            if !Self::is_valid(&name) {
                continue;
            }

            if seen.insert(name.to_lowercase()) {
                entities.push(Entity {
                    name,
                    entity_type: "unknown".to_string(),
                    source_label: "PATTERN".to_string(),
                    language: Some(language.code().to_string()),
                });
            }
        }

        Ok(entities)
    }
}
