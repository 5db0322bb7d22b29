//! Neo4j graph source over the HTTP transactional Cypher endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::HybragError;
use crate::errors::Result;
use crate::models::Chunk;

use super::GraphSource;

/// Chunks mentioning the named entity, joined back to their documents.
const MENTIONS_QUERY: &str = r"
MATCH (e:Entity {name: $name})<-[:MENTIONS]-(c:Chunk)
MATCH (d:Document)-[:CONTAINS]->(c)
RETURN
    d.id    AS document_id,
    c.id    AS chunk_id,
    c.text  AS text,
    c.page  AS page_number
";

/// Graph source backed by Neo4j's HTTP transactional API.
pub struct Neo4jGraphSource {
    client: Client,
    endpoint: String,
    user: String,
    password: String,
    database: String,
}

#[derive(Serialize)]
struct CypherStatements {
    statements: Vec<CypherStatement>,
}

#[derive(Serialize)]
struct CypherStatement {
    statement: &'static str,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct CypherResponse {
    results: Vec<CypherResult>,
    #[serde(default)]
    errors: Vec<CypherError>,
}

#[derive(Deserialize)]
struct CypherResult {
    data: Vec<CypherRow>,
}

#[derive(Deserialize)]
struct CypherRow {
    row: (String, String, String, i32),
}

#[derive(Deserialize)]
struct CypherError {
    code: String,
    message: String,
}

impl Neo4jGraphSource {
    /// Create a new graph source
    pub fn new(
        endpoint: String,
        user: String,
        password: String,
        database: String,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| HybragError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            user,
            password,
            database,
        })
    }

    /// Create a graph source from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.graph.http_endpoint.clone(),
            config.graph.user.clone(),
            config.graph.password.clone(),
            config.graph.database.clone(),
        )
    }

    async fn run(&self, name: &str) -> Result<Vec<Chunk>> {
        let url = format!("{}/db/{}/tx/commit", self.endpoint, self.database);
        debug!("Running graph query for entity: {}", name);

        let request = CypherStatements {
            statements: vec![CypherStatement {
                statement: MENTIONS_QUERY,
                parameters: json!({ "name": name }),
            }],
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
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
            return Err(HybragError::GraphQuery(format!(
                "Neo4j HTTP error ({status}): {error_text}"
            )));
        }

        let result: CypherResponse = response
            .json()
            .await
            .map_err(|e| HybragError::GraphQuery(format!("Failed to parse response: {e}")))?;

        if let Some(error) = result.errors.first() {
            return Err(HybragError::GraphQuery(format!(
                "{}: {}",
                error.code, error.message
            )));
        }

        let chunks = result
            .results
            .into_iter()
            .flat_map(|r| r.data)
            .map(|r| {
                let (document_id, chunk_id, text, page_number) = r.row;
                Chunk {
                    document_id,
                    page_number,
                    chunk_id,
                    text,
                    language: None,
                }
            })
            .collect();

        Ok(chunks)
    }
}

#[async_trait]
impl GraphSource for Neo4jGraphSource {
    async fn query(&self, entity_name: Option<&str>) -> Result<Vec<Chunk>> {
        // A missing target must read as "no hits", never as a query error
        let Some(name) = entity_name else {
            return Ok(Vec::new());
        };
        if name.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.run(name).await
    }
}
