mod experience;
mod soft;
mod technical;

pub use experience::{ExperienceScorer, AFFINITY_THRESHOLD};
pub use soft::soft_score;
pub use technical::{technical_score, CRITICAL_WEIGHT, STANDARD_WEIGHT};

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, warn};

use super::affinity::{AffinityError, RoleAffinity};
use super::domain::{CandidateProfile, MatchResult, OfferProfile, ScoreBreakdown};

/// Source of the calendar date elapsed months are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationClock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl EvaluationClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            EvaluationClock::System => Local::now().date_naive(),
            EvaluationClock::Fixed(date) => *date,
        }
    }
}

/// Candidate level over required level, capped at full credit.
///
/// A zero requirement is no bar at all; no upper bound on the level scale is assumed.
pub fn level_match(candidate_level: u32, required_level: u32) -> f64 {
    if required_level == 0 {
        return 1.0;
    }
    (f64::from(candidate_level) / f64::from(required_level)).min(1.0)
}

fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless aggregator combining the three sub-scores with the offer's weights.
pub struct MatchingEngine<A> {
    experience: ExperienceScorer<A>,
    clock: EvaluationClock,
}

impl<A: RoleAffinity> MatchingEngine<A> {
    pub fn new(affinity: A) -> Self {
        Self {
            experience: ExperienceScorer::new(affinity),
            clock: EvaluationClock::System,
        }
    }

    pub fn with_clock(mut self, clock: EvaluationClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> EvaluationClock {
        self.clock
    }

    pub fn experience_scorer(&self) -> &ExperienceScorer<A> {
        &self.experience
    }

    /// Single-pass evaluation of one candidate against one offer.
    ///
    /// Rounding to two decimals happens once, on the way out.
    pub fn aggregate(
        &self,
        candidate: &CandidateProfile,
        offer: &OfferProfile,
    ) -> Result<MatchResult, AffinityError> {
        let today = self.clock.today();

        let technical = technical_score(&candidate.skills, &offer.requirements, today);
        let soft = soft_score(&candidate.skills, &offer.requirements);
        let experience = self.experience.score(
            &candidate.experiences,
            &offer.title,
            offer.min_experience_months,
            today,
        )?;

        let weights = offer.weights;
        if !weights.is_normalized() {
            warn!(
                offer = %offer.offer_id,
                total = weights.total(),
                "offer weights do not sum to 1; final score is unbounded"
            );
        }

        let final_score =
            weights.technical * technical + weights.soft * soft + weights.experience * experience;

        debug!(
            candidate = %candidate.candidate_id,
            offer = %offer.offer_id,
            technical,
            soft,
            experience,
            final_score,
            "match evaluated"
        );

        Ok(MatchResult {
            scores: ScoreBreakdown {
                final_score: round_score(final_score),
                technical_score: round_score(technical),
                soft_score: round_score(soft),
                experience_score: round_score(experience),
            },
            computed_at: Utc::now(),
        })
    }
}
