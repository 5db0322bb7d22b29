//! Semantic search over the pgvector chunk store

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::language::Language;
use crate::models::Chunk;

use super::VectorSource;

/// Vector source backed by Postgres + pgvector.
///
/// Read-only: the chunk table and its embeddings are populated by the
/// ingestion pipeline, which lives outside this service.
pub struct PgVectorSource {
    pool: PgPool,
    embeddings: Arc<EmbeddingClient>,
    limit: i64,
}

impl PgVectorSource {
    #[must_use]
    pub fn new(pool: PgPool, embeddings: Arc<EmbeddingClient>, limit: i64) -> Self {
        Self {
            pool,
            embeddings,
            limit,
        }
    }

    /// Create a vector source from configuration, connecting a fresh pool
    pub async fn from_config(
        config: &AppConfig,
        embeddings: Arc<EmbeddingClient>,
    ) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(config.database_url()).await?;

        tracing::info!(
            "Vector store pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool, embeddings, config.vector_limit()))
    }

    /// Get a reference to the underlying pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VectorSource for PgVectorSource {
    async fn search(&self, question: &str, language: Language) -> Result<Vec<Chunk>> {
        debug!(
            "Performing semantic search (language: {}): {}",
            language, question
        );

        let query_embedding = self.embeddings.generate(question).await?;
        let query_vector = pgvector::Vector::from(query_embedding);

        // Hits carry their language column but are not filtered by it; the
        // embedding space is multilingual and cross-language hits are kept
        let chunks = sqlx::query_as::<_, Chunk>(
            r"
            SELECT
                document_id,
                page_number,
                chunk_id,
                text,
                language
            FROM chunks
            ORDER BY embedding <=> $1::vector
            LIMIT $2
            ",
        )
        .bind(&query_vector)
        .bind(self.limit)
        .fetch_all(&self.pool)
        .await?;

        debug!("Vector search returned {} chunks", chunks.len());

        Ok(chunks)
    }
}
