use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateProfile, MatchResult, OfferId, OfferProfile};

/// Persisted evaluation keyed by the candidate/offer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub candidate_id: CandidateId,
    pub offer_id: OfferId,
    pub result: MatchResult,
}

/// Data access gateway the matching service reads profiles from and writes results to.
pub trait TalentRepository: Send + Sync {
    fn fetch_candidate(&self, id: &CandidateId)
        -> Result<Option<CandidateProfile>, RepositoryError>;
    fn fetch_offer(&self, id: &OfferId) -> Result<Option<OfferProfile>, RepositoryError>;
    /// Replaces any prior record for the same candidate/offer pair.
    fn upsert_match(&self, record: MatchRecord) -> Result<(), RepositoryError>;
    fn matches_for_offer(&self, id: &OfferId) -> Result<Vec<MatchRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local gateway used by the demo binary and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTalentRepository {
    candidates: Arc<Mutex<HashMap<CandidateId, CandidateProfile>>>,
    offers: Arc<Mutex<HashMap<OfferId, OfferProfile>>>,
    matches: Arc<Mutex<HashMap<(CandidateId, OfferId), MatchRecord>>>,
}

impl InMemoryTalentRepository {
    pub fn with_profiles(
        candidates: impl IntoIterator<Item = CandidateProfile>,
        offers: impl IntoIterator<Item = OfferProfile>,
    ) -> Self {
        let repository = Self::default();
        for candidate in candidates {
            repository.put_candidate(candidate);
        }
        for offer in offers {
            repository.put_offer(offer);
        }
        repository
    }

    pub fn put_candidate(&self, candidate: CandidateProfile) {
        self.candidates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(candidate.candidate_id.clone(), candidate);
    }

    pub fn put_offer(&self, offer: OfferProfile) {
        self.offers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(offer.offer_id.clone(), offer);
    }

    /// Candidate ids in ascending order.
    pub fn candidate_ids(&self) -> Vec<CandidateId> {
        let mut ids: Vec<CandidateId> = self
            .candidates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn match_count(&self) -> usize {
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl TalentRepository for InMemoryTalentRepository {
    fn fetch_candidate(
        &self,
        id: &CandidateId,
    ) -> Result<Option<CandidateProfile>, RepositoryError> {
        let guard = self.candidates.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(id).cloned())
    }

    fn fetch_offer(&self, id: &OfferId) -> Result<Option<OfferProfile>, RepositoryError> {
        let guard = self.offers.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(id).cloned())
    }

    fn upsert_match(&self, record: MatchRecord) -> Result<(), RepositoryError> {
        let mut guard = self.matches.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(
            (record.candidate_id.clone(), record.offer_id.clone()),
            record,
        );
        Ok(())
    }

    fn matches_for_offer(&self, id: &OfferId) -> Result<Vec<MatchRecord>, RepositoryError> {
        let guard = self.matches.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard
            .values()
            .filter(|record| &record.offer_id == id)
            .cloned()
            .collect())
    }
}
