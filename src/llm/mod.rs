//! LLM-backed answer synthesis
//!
//! The synthesizer turns a question plus retrieved passages into prose. Its
//! prompt contract matters to the cascade: both the English and Arabic
//! templates instruct the model to say explicitly when the context does not
//! contain the answer, which is what keeps the non-answer trigger list in
//! [`crate::rag::non_answer`] meaningful.

pub mod prompts;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::HybragError;
use crate::errors::Result;
use crate::language::Language;
use crate::models::Chunk;

pub use prompts::PromptTemplate;

/// Turns a question and retrieved context into a grounded answer.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        question: &str,
        chunks: &[Chunk],
        language: Language,
    ) -> Result<String>;
}

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| HybragError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.llm_endpoint().to_string(),
            api_key: config.llm_key().to_string(),
            model: config.llm_model().to_string(),
        })
    }

    /// Run a single-turn completion with temperature 0
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
        }

        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatResponseMessage,
        }

        #[derive(Deserialize)]
        struct ChatResponseMessage {
            content: String,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| HybragError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HybragError::Llm(format!(
                "Chat completions API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| HybragError::Llm(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| HybragError::Llm("No choices in response".to_string()))
    }

    /// Render retrieved chunks into the context block the prompts expect
    fn format_context(chunks: &[Chunk]) -> String {
        chunks
            .iter()
            .map(|c| {
                format!(
                    "[Doc {} | Page {} | Chunk {}]\n{}",
                    c.document_id, c.page_number, c.chunk_id, c.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl Synthesizer for LlmService {
    async fn synthesize(
        &self,
        question: &str,
        chunks: &[Chunk],
        language: Language,
    ) -> Result<String> {
        let context = Self::format_context(chunks);

        let template = if language.is_english() {
            prompts::grounded_qa_en()
        } else {
            prompts::grounded_qa_ar()
        };

        let mut values = std::collections::HashMap::new();
        values.insert("context".to_string(), context);
        values.insert("question".to_string(), question.to_string());

        let prompt = template.render(&values);
        debug!(
            "Synthesizing answer from {} chunks (language: {})",
            chunks.len(),
            language
        );

        self.complete(&prompt).await
    }
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
    fn test_format_context_renders_identity_header() {
        let chunks = vec![
            chunk("d1", 2, "c1", "alpha"),
            chunk("d2", 5, "c9", "beta"),
        ];
        let context = LlmService::format_context(&chunks);
        assert!(context.contains("[Doc d1 | Page 2 | Chunk c1]\nalpha"));
        assert!(context.contains("[Doc d2 | Page 5 | Chunk c9]\nbeta"));
    }

    #[test]
    fn test_format_context_empty() {
        assert_eq!(LlmService::format_context(&[]), "");
    }
}
