//! API request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use uuid::Uuid;

use crate::api::types::ApiResponse;
use crate::api::types::AskRequest;
use crate::api::types::HealthResponse;
use crate::errors::HybragError;
use crate::models::Answer;
use crate::rag::KnowledgeRouter;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<KnowledgeRouter>,
}

/// Health check
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Answer a question
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> (StatusCode, Json<ApiResponse<Answer>>) {
    let trace_id = Uuid::new_v4();
    info!("POST /api/ask [{}]: {}", trace_id, req.question);

    match state.router.answer(&req.question).await {
        Ok(answer) => {
            info!("[{}] answered via {}", trace_id, answer.knowledge);
            (StatusCode::OK, Json(ApiResponse::success(answer)))
        }
        // Terminal cascade outcomes are part of the contract, not failures
        Err(e @ (HybragError::NoAnswerAvailable | HybragError::NoSearchResults)) => {
            info!("[{}] no answer: {}", trace_id, e);
            (StatusCode::NOT_FOUND, Json(ApiResponse::error(e.to_string())))
        }
        Err(e) => {
            error!("[{}] error processing question: {}", trace_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal error")),
            )
        }
    }
}
