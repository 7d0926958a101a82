use std::cmp::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::affinity::{AffinityError, EmbeddingProvider, EmbeddingRoleAffinity};
use super::domain::{
    CandidateId, CandidateProfile, MatchResult, OfferId, OfferProfile, ScoreBreakdown,
};
use super::repository::{MatchRecord, RepositoryError, TalentRepository};
use super::scoring::{EvaluationClock, MatchingEngine};

/// Service composing the data access gateway, the embedding provider and the engine.
pub struct MatchingService<R, P> {
    repository: Arc<R>,
    provider: Arc<P>,
    clock: EvaluationClock,
}

/// Outcome of an evaluation, labelled for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvaluation {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub offer_id: OfferId,
    pub offer_title: String,
    pub result: MatchResult,
}

/// One row of an offer's ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
}

impl<R, P> MatchingService<R, P>
where
    R: TalentRepository + 'static,
    P: EmbeddingProvider + 'static,
{
    pub fn new(repository: Arc<R>, provider: Arc<P>) -> Self {
        Self {
            repository,
            provider,
            clock: EvaluationClock::System,
        }
    }

    pub fn with_clock(mut self, clock: EvaluationClock) -> Self {
        self.clock = clock;
        self
    }

    /// Engine whose affinity cache lives as long as the engine itself.
    fn engine(&self) -> MatchingEngine<EmbeddingRoleAffinity<Arc<P>>> {
        MatchingEngine::new(EmbeddingRoleAffinity::new(Arc::clone(&self.provider)))
            .with_clock(self.clock)
    }

    /// Evaluate one candidate against one offer and persist the result.
    pub fn evaluate(
        &self,
        candidate_id: &CandidateId,
        offer_id: &OfferId,
    ) -> Result<MatchEvaluation, MatchServiceError> {
        let offer = self.load_offer(offer_id)?;
        let candidate = self.load_candidate(candidate_id)?;
        self.score_and_store(&self.engine(), &candidate, &offer)
    }

    /// Evaluate many candidates against one offer, sharing one affinity cache.
    pub fn evaluate_offer(
        &self,
        offer_id: &OfferId,
        candidate_ids: &[CandidateId],
    ) -> Result<Vec<MatchEvaluation>, MatchServiceError> {
        let offer = self.load_offer(offer_id)?;
        let engine = self.engine();

        candidate_ids
            .iter()
            .map(|candidate_id| {
                let candidate = self.load_candidate(candidate_id)?;
                self.score_and_store(&engine, &candidate, &offer)
            })
            .collect()
    }

    /// Persisted results for an offer, best first.
    pub fn ranking(
        &self,
        offer_id: &OfferId,
        limit: usize,
    ) -> Result<Vec<RankedCandidate>, MatchServiceError> {
        self.load_offer(offer_id)?;

        let mut records = self.repository.matches_for_offer(offer_id)?;
        records.sort_by(|a, b| {
            b.result
                .final_score()
                .partial_cmp(&a.result.final_score())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        records.truncate(limit);

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let candidate_name = self
                    .repository
                    .fetch_candidate(&record.candidate_id)?
                    .map(|candidate| candidate.full_name)
                    .unwrap_or_else(|| record.candidate_id.to_string());
                Ok(RankedCandidate {
                    rank: index + 1,
                    candidate_id: record.candidate_id,
                    candidate_name,
                    scores: record.result.scores,
                })
            })
            .collect()
    }

    fn load_candidate(&self, id: &CandidateId) -> Result<CandidateProfile, MatchServiceError> {
        self.repository
            .fetch_candidate(id)?
            .ok_or_else(|| MatchServiceError::CandidateNotFound(id.clone()))
    }

    fn load_offer(&self, id: &OfferId) -> Result<OfferProfile, MatchServiceError> {
        self.repository
            .fetch_offer(id)?
            .ok_or_else(|| MatchServiceError::OfferNotFound(id.clone()))
    }

    fn score_and_store(
        &self,
        engine: &MatchingEngine<EmbeddingRoleAffinity<Arc<P>>>,
        candidate: &CandidateProfile,
        offer: &OfferProfile,
    ) -> Result<MatchEvaluation, MatchServiceError> {
        let result = engine.aggregate(candidate, offer)?;

        self.repository.upsert_match(MatchRecord {
            candidate_id: candidate.candidate_id.clone(),
            offer_id: offer.offer_id.clone(),
            result: result.clone(),
        })?;

        info!(
            candidate = %candidate.candidate_id,
            offer = %offer.offer_id,
            final_score = result.final_score(),
            "match result stored"
        );

        Ok(MatchEvaluation {
            candidate_id: candidate.candidate_id.clone(),
            candidate_name: candidate.full_name.clone(),
            offer_id: offer.offer_id.clone(),
            offer_title: offer.title.clone(),
            result,
        })
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("candidate '{0}' not found")]
    CandidateNotFound(CandidateId),
    #[error("offer '{0}' not found")]
    OfferNotFound(OfferId),
    #[error(transparent)]
    Affinity(#[from] AffinityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MatchServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MatchServiceError::CandidateNotFound(_)
            | MatchServiceError::OfferNotFound(_)
            | MatchServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            MatchServiceError::Affinity(_) => StatusCode::SERVICE_UNAVAILABLE,
            MatchServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
