use std::collections::HashMap;

use chrono::NaiveDate;

use super::super::domain::{CandidateSkill, OfferRequirement, SkillCategory};
use super::super::recency::recency_factor;
use super::level_match;

pub const CRITICAL_WEIGHT: f64 = 1.5;
pub const STANDARD_WEIGHT: f64 = 1.0;

/// Weighted technical fit in `[0, 1]`.
///
/// Every technical requirement adds its weight to the denominator whether or
/// not the candidate holds the skill, so a missing critical skill costs more
/// than a missing ordinary one. Held skills contribute their capped level
/// ratio scaled by recency decay.
pub fn technical_score(
    skills: &[CandidateSkill],
    requirements: &[OfferRequirement],
    today: NaiveDate,
) -> f64 {
    let requirements: Vec<&OfferRequirement> = requirements
        .iter()
        .filter(|requirement| requirement.category == SkillCategory::Technical)
        .collect();

    if requirements.is_empty() {
        return 1.0;
    }

    let held: HashMap<&str, &CandidateSkill> = skills
        .iter()
        .filter(|skill| skill.category == SkillCategory::Technical)
        .map(|skill| (skill.name.as_str(), skill))
        .collect();

    let mut total_weight = 0.0_f64;
    let mut weighted_score = 0.0_f64;

    for requirement in requirements {
        let weight = if requirement.is_critical {
            CRITICAL_WEIGHT
        } else {
            STANDARD_WEIGHT
        };
        total_weight += weight;

        let Some(skill) = held.get(requirement.skill_name.as_str()) else {
            continue;
        };

        let ratio = level_match(skill.level, requirement.min_level);
        let recency = recency_factor(skill.last_used, today);
        weighted_score += ratio * recency * weight;
    }

    if total_weight > 0.0 {
        weighted_score / total_weight
    } else {
        0.0
    }
}
