use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{Months, NaiveDate};
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::matching::affinity::{AffinityError, EmbeddingProvider, RoleAffinity};
use crate::matching::domain::{
    CandidateId, CandidateProfile, CandidateSkill, ExperienceEntry, OfferId, OfferProfile,
    OfferRequirement, ScoreWeights, SkillCategory,
};
use crate::matching::repository::{
    InMemoryTalentRepository, MatchRecord, RepositoryError, TalentRepository,
};
use crate::matching::scoring::EvaluationClock;
use crate::matching::service::MatchingService;
use crate::matching::{matching_router, MatchingApi};

pub(super) const OFFER_TITLE: &str = "Backend Engineer";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn months_ago(months: u32) -> NaiveDate {
    today()
        .checked_sub_months(Months::new(months))
        .expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn technical(name: &str, level: u32, last_used: Option<NaiveDate>) -> CandidateSkill {
    CandidateSkill {
        name: name.to_string(),
        category: SkillCategory::Technical,
        level,
        last_used,
    }
}

pub(super) fn soft(name: &str, level: u32) -> CandidateSkill {
    CandidateSkill {
        name: name.to_string(),
        category: SkillCategory::Soft,
        level,
        last_used: None,
    }
}

pub(super) fn requirement(
    name: &str,
    category: SkillCategory,
    min_level: u32,
    is_critical: bool,
) -> OfferRequirement {
    OfferRequirement {
        skill_name: name.to_string(),
        category,
        min_level,
        is_critical,
    }
}

pub(super) fn role(title: &str, start: NaiveDate, end: Option<NaiveDate>) -> ExperienceEntry {
    ExperienceEntry {
        role_title: title.to_string(),
        start_date: start,
        end_date: end,
    }
}

/// Offer from the reference scenario: one critical technical skill, one soft
/// skill, a 12-month experience bar and weights 0.5/0.2/0.3.
pub(super) fn scenario_offer() -> OfferProfile {
    OfferProfile {
        offer_id: OfferId("offer-backend".to_string()),
        title: OFFER_TITLE.to_string(),
        seniority: "Semi Senior".to_string(),
        min_experience_months: 12,
        weights: ScoreWeights {
            technical: 0.5,
            soft: 0.2,
            experience: 0.3,
        },
        requirements: vec![
            requirement("Rust", SkillCategory::Technical, 3, true),
            requirement("Communication", SkillCategory::Soft, 2, false),
        ],
    }
}

pub(super) fn scenario_candidate() -> CandidateProfile {
    CandidateProfile {
        candidate_id: CandidateId("ana@example.com".to_string()),
        full_name: "Ana Torres".to_string(),
        skills: vec![
            technical("Rust", 3, Some(months_ago(2))),
            soft("Communication", 4),
        ],
        experiences: vec![role(
            "Software Engineer",
            date(2023, 1, 1),
            Some(date(2024, 7, 1)),
        )],
    }
}

pub(super) fn weak_candidate() -> CandidateProfile {
    CandidateProfile {
        candidate_id: CandidateId("bruno@example.com".to_string()),
        full_name: "Bruno Diaz".to_string(),
        skills: vec![technical("Rust", 1, Some(months_ago(30)))],
        experiences: vec![role("Pastry Chef", date(2019, 1, 1), None)],
    }
}

/// Role affinity test double returning a preset value per candidate role title.
#[derive(Default)]
pub(super) struct FixedAffinity {
    values: HashMap<String, f64>,
}

impl FixedAffinity {
    pub(super) fn with(mut self, role: &str, value: f64) -> Self {
        self.values.insert(role.to_string(), value);
        self
    }
}

impl RoleAffinity for FixedAffinity {
    fn affinity(&self, role_a: &str, _role_b: &str) -> Result<f64, AffinityError> {
        Ok(self.values.get(role_a).copied().unwrap_or(0.0))
    }
}

pub(super) struct FailingAffinity;

impl RoleAffinity for FailingAffinity {
    fn affinity(&self, _role_a: &str, _role_b: &str) -> Result<f64, AffinityError> {
        Err(AffinityError::ProviderUnavailable("model offline".to_string()))
    }
}

/// Embedding double: the offer title points along x, "software engineer"
/// sits at cosine 0.8 from it, anything else is orthogonal.
#[derive(Default)]
pub(super) struct TableProvider {
    calls: AtomicUsize,
}

impl TableProvider {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for TableProvider {
    fn encode(&self, text: &str) -> Result<Vec<f32>, AffinityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match text {
            "backend engineer" => vec![1.0, 0.0],
            "software engineer" => vec![0.8, 0.6],
            _ => vec![0.0, 1.0],
        })
    }
}

/// Embedding double emitting a NaN component for every title.
pub(super) struct DegenerateProvider;

impl EmbeddingProvider for DegenerateProvider {
    fn encode(&self, _text: &str) -> Result<Vec<f32>, AffinityError> {
        Ok(vec![f32::NAN, 1.0])
    }
}

/// Embedding double that holds each call open briefly and records the peak
/// number of overlapping calls.
#[derive(Default)]
pub(super) struct SlowProvider {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl SlowProvider {
    pub(super) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for SlowProvider {
    fn encode(&self, _text: &str) -> Result<Vec<f32>, AffinityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(40));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(vec![1.0, 0.0])
    }
}

pub(super) struct FailingProvider;

impl EmbeddingProvider for FailingProvider {
    fn encode(&self, _text: &str) -> Result<Vec<f32>, AffinityError> {
        Err(AffinityError::ProviderUnavailable("model offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl TalentRepository for UnavailableRepository {
    fn fetch_candidate(
        &self,
        _id: &CandidateId,
    ) -> Result<Option<CandidateProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("graph offline".to_string()))
    }

    fn fetch_offer(&self, _id: &OfferId) -> Result<Option<OfferProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("graph offline".to_string()))
    }

    fn upsert_match(&self, _record: MatchRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("graph offline".to_string()))
    }

    fn matches_for_offer(&self, _id: &OfferId) -> Result<Vec<MatchRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("graph offline".to_string()))
    }
}

pub(super) fn seeded_repository() -> Arc<InMemoryTalentRepository> {
    Arc::new(InMemoryTalentRepository::with_profiles(
        [scenario_candidate(), weak_candidate()],
        [scenario_offer()],
    ))
}

pub(super) fn build_service<P: EmbeddingProvider + 'static>(
    repository: Arc<InMemoryTalentRepository>,
    provider: Arc<P>,
) -> MatchingService<InMemoryTalentRepository, P> {
    MatchingService::new(repository, provider).with_clock(EvaluationClock::Fixed(today()))
}

pub(super) fn build_router() -> (axum::Router, Arc<InMemoryTalentRepository>) {
    let repository = seeded_repository();
    let service = build_service(Arc::clone(&repository), Arc::new(TableProvider::default()));
    let api = MatchingApi::new(Arc::new(service), &MatchingConfig::default());
    (matching_router(api), repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
