//! Candidate/offer compatibility scoring.
//!
//! Three sub-scores feed a weighted aggregate: technical fit (level ratio,
//! recency decay, critical weighting), soft-skill fit (mean level ratio) and
//! experience fit (tenure gated and weighted by role-title affinity). The
//! engine is synchronous and holds no shared mutable state; the service and
//! router wrap it with the data access gateway and a concurrency gate.

pub mod affinity;
pub mod domain;
mod hashing;
pub mod recency;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use affinity::{
    cosine_similarity, AffinityError, EmbeddingProvider, EmbeddingRoleAffinity, RoleAffinity,
};
pub use domain::{
    CandidateId, CandidateProfile, CandidateSkill, ExperienceEntry, MatchResult, OfferId,
    OfferProfile, OfferRequirement, ScoreBreakdown, ScoreWeights, SkillCategory,
};
pub use hashing::HashingEmbeddingProvider;
pub use repository::{InMemoryTalentRepository, MatchRecord, RepositoryError, TalentRepository};
pub use router::{matching_router, MatchingApi};
pub use scoring::{EvaluationClock, ExperienceScorer, MatchingEngine};
pub use service::{MatchEvaluation, MatchServiceError, MatchingService, RankedCandidate};
