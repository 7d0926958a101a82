use chrono::NaiveDate;
use tracing::trace;

use super::super::affinity::{AffinityError, RoleAffinity};
use super::super::domain::ExperienceEntry;
use super::super::recency::tenure_months;

/// Minimum role affinity for a work-history entry to count at all.
pub const AFFINITY_THRESHOLD: f64 = 0.6;

/// Scores work history against an offer title and a minimum tenure.
///
/// Entries shorter than a month are discarded. Entries whose title affinity
/// falls below [`AFFINITY_THRESHOLD`] contribute nothing; the rest contribute
/// `tenure_months * affinity`.
pub struct ExperienceScorer<A> {
    affinity: A,
}

impl<A: RoleAffinity> ExperienceScorer<A> {
    pub fn new(affinity: A) -> Self {
        Self { affinity }
    }

    pub fn affinity(&self) -> &A {
        &self.affinity
    }

    pub fn score(
        &self,
        experiences: &[ExperienceEntry],
        offer_title: &str,
        min_required_months: i64,
        today: NaiveDate,
    ) -> Result<f64, AffinityError> {
        if min_required_months <= 0 {
            return Ok(1.0);
        }
        if experiences.is_empty() {
            return Ok(0.0);
        }

        let mut weighted_months = 0.0_f64;

        for entry in experiences {
            let tenure = tenure_months(entry.start_date, entry.end_date, today);
            if tenure < 1 {
                continue;
            }

            let affinity = self.affinity.affinity(&entry.role_title, offer_title)?;
            trace!(role = %entry.role_title, tenure, affinity, "experience entry");
            if !affinity.is_finite() || affinity < AFFINITY_THRESHOLD {
                continue;
            }

            weighted_months += f64::from(tenure) * affinity;
        }

        Ok((weighted_months / min_required_months as f64).min(1.0))
    }
}
