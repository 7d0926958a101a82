use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Semaphore;
use tracing::error;

use super::affinity::EmbeddingProvider;
use super::domain::{CandidateId, OfferId};
use super::repository::TalentRepository;
use super::service::{MatchServiceError, MatchingService};
use crate::config::MatchingConfig;

/// Shared handler state: the service plus the gate bounding concurrent evaluations.
pub struct MatchingApi<R, P> {
    service: Arc<MatchingService<R, P>>,
    permits: Arc<Semaphore>,
    ranking_limit: usize,
}

impl<R, P> Clone for MatchingApi<R, P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            permits: Arc::clone(&self.permits),
            ranking_limit: self.ranking_limit,
        }
    }
}

impl<R, P> MatchingApi<R, P> {
    pub fn new(service: Arc<MatchingService<R, P>>, config: &MatchingConfig) -> Self {
        Self {
            service,
            permits: Arc::new(Semaphore::new(config.max_concurrent_evaluations.max(1))),
            ranking_limit: config.ranking_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) candidate_id: CandidateId,
    pub(crate) offer_id: OfferId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingQuery {
    pub(crate) limit: Option<usize>,
}

/// Router builder exposing the evaluation and ranking endpoints.
pub fn matching_router<R, P>(api: MatchingApi<R, P>) -> Router
where
    R: TalentRepository + 'static,
    P: EmbeddingProvider + 'static,
{
    Router::new()
        .route("/api/v1/matches", post(evaluate_handler::<R, P>))
        .route(
            "/api/v1/offers/:offer_id/ranking",
            get(ranking_handler::<R, P>),
        )
        .with_state(api)
}

pub(crate) async fn evaluate_handler<R, P>(
    State(api): State<MatchingApi<R, P>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    R: TalentRepository + 'static,
    P: EmbeddingProvider + 'static,
{
    let permit = match Arc::clone(&api.permits).acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            let payload = json!({ "error": "evaluation gate closed" });
            return (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response();
        }
    };

    let service = Arc::clone(&api.service);
    let joined = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        service.evaluate(&request.candidate_id, &request.offer_id)
    })
    .await;

    match joined {
        Ok(Ok(evaluation)) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Ok(Err(err)) => error_response(err),
        Err(join_error) => {
            error!(%join_error, "evaluation task failed");
            let payload = json!({ "error": "evaluation task failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn ranking_handler<R, P>(
    State(api): State<MatchingApi<R, P>>,
    Path(offer_id): Path<String>,
    Query(query): Query<RankingQuery>,
) -> Response
where
    R: TalentRepository + 'static,
    P: EmbeddingProvider + 'static,
{
    let offer_id = OfferId(offer_id);
    let limit = query.limit.unwrap_or(api.ranking_limit);

    match api.service.ranking(&offer_id, limit) {
        Ok(ranking) => {
            let payload = json!({
                "offer_id": offer_id,
                "candidates": ranking,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: MatchServiceError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        error!(%err, "matching request failed");
    }
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
