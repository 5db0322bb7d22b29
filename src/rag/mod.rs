//! Hybrid retrieval orchestration
//!
//! This module is the decision engine of the service: given a question it
//! decides which knowledge sources to consult, in what order, how to judge
//! whether a retrieved context actually answers the question, when to fall
//! back, and how the cascade adapts to the question's language and
//! specificity. Stateless per call; all collaborators are injected.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hybrag::config::AppConfig;
//! use hybrag::rag::KnowledgeRouter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let router = KnowledgeRouter::from_config(&config).await?;
//!
//!     let result = router.answer("Who founded Acme Corporation?").await?;
//!     println!("Answer: {}", result.answer);
//!     println!("Knowledge: {}", result.knowledge);
//!
//!     Ok(())
//! }
//! ```

pub mod dedupe;
pub mod intent;
pub mod non_answer;
pub mod router;

pub use dedupe::dedupe_chunks;
pub use non_answer::is_non_answer;
pub use router::KnowledgeRouter;
