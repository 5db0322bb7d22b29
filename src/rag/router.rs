//! The knowledge source router: one question in, one grounded answer out

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::errors::HybragError;
use crate::errors::Result;
use crate::extraction::EntityExtractor;
use crate::extraction::LlmExtractor;
use crate::extraction::PatternExtractor;
use crate::extraction::SmartExtractor;
use crate::language::detect_language;
use crate::language::Language;
use crate::llm::LlmService;
use crate::llm::Synthesizer;
use crate::models::Answer;
use crate::models::Entity;
use crate::models::Knowledge;
use crate::models::Sources;
use crate::rag::dedupe::dedupe_chunks;
use crate::rag::intent;
use crate::rag::non_answer::is_non_answer;
use crate::sources::GraphSource;
use crate::sources::Neo4jGraphSource;
use crate::sources::PgVectorSource;
use crate::sources::SerpWebSource;
use crate::sources::VectorSource;
use crate::sources::WebSource;

/// Per-call classification state, computed once up front and threaded
/// through the cascade. Nothing in here is ever recomputed mid-call.
struct QueryContext {
    language: Language,
    doc_specific: bool,
    entities: Vec<Entity>,
}

/// Orchestrates the graph, vector, and web sources into a single cascade.
///
/// Collaborators are explicit injected dependencies; the router holds no
/// other state and every `answer` call is independent.
pub struct KnowledgeRouter {
    extractor: Arc<dyn EntityExtractor>,
    graph: Arc<dyn GraphSource>,
    vector: Arc<dyn VectorSource>,
    web: Arc<dyn WebSource>,
    synthesizer: Arc<dyn Synthesizer>,
}

impl KnowledgeRouter {
    /// Create a router from explicit collaborators
    #[must_use]
    pub fn new(
        extractor: Arc<dyn EntityExtractor>,
        graph: Arc<dyn GraphSource>,
        vector: Arc<dyn VectorSource>,
        web: Arc<dyn WebSource>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            extractor,
            graph,
            vector,
            web,
            synthesizer,
        }
    }

    /// Create a router wired to the configured production collaborators
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let llm = Arc::new(LlmService::new(config)?);
        let embeddings = Arc::new(EmbeddingClient::from_config(config)?);

        let extractor = SmartExtractor::new(
            PatternExtractor::new(),
            LlmExtractor::new(Arc::clone(&llm)),
        );
        let graph = Neo4jGraphSource::from_config(config)?;
        let vector = PgVectorSource::from_config(config, embeddings).await?;
        let web = SerpWebSource::from_config(config)?;

        Ok(Self::new(
            Arc::new(extractor),
            Arc::new(graph),
            Arc::new(vector),
            Arc::new(web),
            llm,
        ))
    }

    /// Answer a question from the best available knowledge source.
    ///
    /// Graph-native questions (those with at least one extracted entity) try
    /// the graph first, then vector retrieval, then the web; everything else
    /// tries vector retrieval, then the graph, then the web. A synthesized
    /// reply that asserts "no information found" counts as a miss and the
    /// cascade continues. The returned [`Knowledge`] tag names the source
    /// that produced the accepted answer.
    ///
    /// # Errors
    /// - Collaborator failures (extraction, source queries, synthesis)
    ///   propagate unchanged; the router makes no retry attempt
    /// - [`HybragError::NoAnswerAvailable`] when every eligible source is
    ///   exhausted and the web fallback is gated off
    /// - [`HybragError::NoSearchResults`] when the web fallback returns no
    ///   organic results
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        info!("Processing question: {}", question);

        let ctx = self.classify(question).await?;

        if intent::graph_intent(&ctx.entities) {
            self.answer_graph_first(question, &ctx).await
        } else {
            self.answer_vector_first(question, &ctx).await
        }
    }

    /// Detect language, document specificity, and entities exactly once
    async fn classify(&self, question: &str) -> Result<QueryContext> {
        let language = detect_language(question);
        let doc_specific = language.is_arabic() && intent::is_document_specific(question);
        let entities = self.extractor.extract(question, language).await?;

        debug!(
            "Classified question: language={}, doc_specific={}, entities={}",
            language,
            doc_specific,
            entities.len()
        );

        Ok(QueryContext {
            language,
            doc_specific,
            entities,
        })
    }

    /// Branch A: graph-native questions get a structured lookup before
    /// degrading to semantic retrieval or the open web
    async fn answer_graph_first(&self, question: &str, ctx: &QueryContext) -> Result<Answer> {
        let target = intent::graph_query_target(&ctx.entities);
        debug!("Graph-first cascade, target: {:?}", target);

        let graph_hits = self.graph.query(target).await?;
        if !graph_hits.is_empty() {
            let answer = self
                .synthesizer
                .synthesize(question, &graph_hits, ctx.language)
                .await?;

            if !is_non_answer(&answer) {
                info!("Answered from graph ({} hits)", graph_hits.len());
                return Ok(Answer {
                    answer,
                    sources: Sources::Chunks(graph_hits),
                    knowledge: Knowledge::Graph,
                });
            }
        }

        // Graph came up empty or ungrounded, fall back to vector retrieval
        let vector_hits = dedupe_chunks(self.vector.search(question, ctx.language).await?);
        if !vector_hits.is_empty() {
            let answer = self
                .synthesizer
                .synthesize(question, &vector_hits, ctx.language)
                .await?;

            if !is_non_answer(&answer) {
                info!("Answered from vector fallback ({} hits)", vector_hits.len());
                return Ok(Answer {
                    answer,
                    sources: Sources::Chunks(vector_hits),
                    knowledge: Knowledge::VectorFallback,
                });
            }
        }

        // Arabic document-bound questions must not leak to external search
        let allow_web = if ctx.language.is_arabic() {
            !ctx.doc_specific
        } else {
            true
        };

        if !allow_web {
            info!("Web fallback gated off for document-specific question");
            return Err(HybragError::NoAnswerAvailable);
        }

        self.answer_online(question).await
    }

    /// Branch B: general questions default to semantic retrieval, with the
    /// graph and the web as successive, ungated fallbacks
    async fn answer_vector_first(&self, question: &str, ctx: &QueryContext) -> Result<Answer> {
        debug!("Vector-first cascade");

        let vector_hits = dedupe_chunks(self.vector.search(question, ctx.language).await?);
        if !vector_hits.is_empty() {
            let answer = self
                .synthesizer
                .synthesize(question, &vector_hits, ctx.language)
                .await?;

            if !is_non_answer(&answer) {
                info!("Answered from vector store ({} hits)", vector_hits.len());
                return Ok(Answer {
                    answer,
                    sources: Sources::Chunks(vector_hits),
                    knowledge: Knowledge::Vector,
                });
            }
        }

        // The raw question text doubles as the entity name here: without an
        // extracted entity there is nothing better to match on
        let graph_hits = self.graph.query(Some(question)).await?;
        if !graph_hits.is_empty() {
            let answer = self
                .synthesizer
                .synthesize(question, &graph_hits, ctx.language)
                .await?;

            if !is_non_answer(&answer) {
                info!("Answered from graph ({} hits)", graph_hits.len());
                return Ok(Answer {
                    answer,
                    sources: Sources::Chunks(graph_hits),
                    knowledge: Knowledge::Graph,
                });
            }
        }

        self.answer_online(question).await
    }

    /// Terminal web fallback: first organic result wins
    async fn answer_online(&self, question: &str) -> Result<Answer> {
        let online = self.web.search(question).await?;

        let first = online
            .organic_results
            .into_iter()
            .next()
            .ok_or(HybragError::NoSearchResults)?;

        info!("Answered from web search");
        Ok(Answer {
            answer: first.snippet,
            sources: Sources::Link(first.link),
            knowledge: Knowledge::Online,
        })
    }
}
