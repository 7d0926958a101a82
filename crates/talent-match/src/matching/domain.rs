use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates, keyed by e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for job offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub String);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
}

/// Skill held by a candidate. Levels are small positive integers on whatever
/// scale the offer uses; nothing here assumes an upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub name: String,
    pub category: SkillCategory,
    pub level: u32,
    #[serde(default)]
    pub last_used: Option<NaiveDate>,
}

/// One entry of a candidate's work history. A missing end date means the role is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role_title: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Fully hydrated candidate record handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub candidate_id: CandidateId,
    pub full_name: String,
    #[serde(default)]
    pub skills: Vec<CandidateSkill>,
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRequirement {
    pub skill_name: String,
    pub category: SkillCategory,
    pub min_level: u32,
    #[serde(default)]
    pub is_critical: bool,
}

/// Offer-defined multipliers for the three sub-scores.
///
/// The weights are not required to sum to one; callers creating offers are
/// expected to enforce that when they want the final score to stay in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub technical: f64,
    pub soft: f64,
    pub experience: f64,
}

impl ScoreWeights {
    const NORMALIZATION_TOLERANCE: f64 = 1e-6;

    pub fn total(&self) -> f64 {
        self.technical + self.soft + self.experience
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= Self::NORMALIZATION_TOLERANCE
    }
}

/// Fully hydrated offer record handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferProfile {
    pub offer_id: OfferId,
    pub title: String,
    pub seniority: String,
    pub min_experience_months: i64,
    pub weights: ScoreWeights,
    #[serde(default)]
    pub requirements: Vec<OfferRequirement>,
}

/// The four rounded numbers of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub technical_score: f64,
    pub soft_score: f64,
    pub experience_score: f64,
}

/// Immutable output of one candidate/offer evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
    pub computed_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn final_score(&self) -> f64 {
        self.scores.final_score
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        self.scores
    }
}
