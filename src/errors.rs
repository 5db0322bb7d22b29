use thiserror::Error;

#[derive(Error, Debug)]
pub enum HybragError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Graph query error: {0}")]
    GraphQuery(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Entity extraction error: {0}")]
    Extraction(String),

    #[error("Web search error: {0}")]
    WebSearch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No answer available: every eligible knowledge source was exhausted")]
    NoAnswerAvailable,

    #[error("Web search returned no organic results")]
    NoSearchResults,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HybragError>;
