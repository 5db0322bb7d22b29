//! LLM-backed multilingual entity extraction

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::errors::Result;
use crate::language::Language;
use crate::llm::prompts;
use crate::llm::LlmService;
use crate::models::Entity;

use super::EntityExtractor;

/// Entity extractor that delegates to the chat-completion service.
///
/// Used for Arabic and every other non-English language, where rule-based
/// extraction does not generalize. A failed request or an unparseable reply
/// degrades to an empty list: an extractor outage must read as "no intent
/// signal", not abort the cascade.
pub struct LlmExtractor {
    llm: Arc<LlmService>,
}

/// Entity shape the extraction prompt asks the model to emit.
#[derive(Deserialize)]
struct RawEntity {
    #[serde(default)]
    name: String,
    #[serde(default = "unknown_type")]
    entity_type: String,
}

fn unknown_type() -> String {
    "unknown".to_string()
}

impl LlmExtractor {
    #[must_use]
    pub fn new(llm: Arc<LlmService>) -> Self {
        Self { llm }
    }

    /// Strip markdown code fences the model sometimes wraps JSON in
    fn clean_json_reply(reply: &str) -> &str {
        let trimmed = reply.trim();
        let trimmed = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
    }

    fn parse_entities(reply: &str, language: Language) -> Option<Vec<Entity>> {
        let raw: Vec<RawEntity> = serde_json::from_str(Self::clean_json_reply(reply)).ok()?;

        let entities = raw
            .into_iter()
            .filter(|e| !e.name.trim().is_empty())
            .map(|e| Entity {
                name: e.name.trim().to_string(),
                entity_type: e.entity_type,
                source_label: "LLM".to_string(),
                language: Some(language.code().to_string()),
            })
            .collect();

        Some(entities)
    }
}

#[async_trait]
impl EntityExtractor for LlmExtractor {
    async fn extract(&self, text: &str, language: Language) -> Result<Vec<Entity>> {
        let mut values = HashMap::new();
        values.insert("language".to_string(), language.code().to_string());
        values.insert("text".to_string(), text.to_string());

        let prompt = prompts::entity_extraction().render(&values);

        let reply = match self.llm.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("LLM entity extraction failed: {}", e);
                return Ok(Vec::new());
            }
        };

        match Self::parse_entities(&reply, language) {
            Some(entities) => Ok(entities),
            None => {
                warn!("LLM entity extraction returned unparseable JSON");
                Ok(Vec::new())
            }
        }
    }
}
