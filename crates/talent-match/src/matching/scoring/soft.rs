use std::collections::HashMap;

use super::super::domain::{CandidateSkill, OfferRequirement, SkillCategory};
use super::level_match;

/// Mean capped level ratio over the offer's soft requirements.
///
/// Soft skills carry no criticality and no recency decay.
pub fn soft_score(skills: &[CandidateSkill], requirements: &[OfferRequirement]) -> f64 {
    let held: HashMap<&str, u32> = skills
        .iter()
        .filter(|skill| skill.category == SkillCategory::Soft)
        .map(|skill| (skill.name.as_str(), skill.level))
        .collect();

    let contributions: Vec<f64> = requirements
        .iter()
        .filter(|requirement| requirement.category == SkillCategory::Soft)
        .map(|requirement| {
            held.get(requirement.skill_name.as_str())
                .map(|level| level_match(*level, requirement.min_level))
                .unwrap_or(0.0)
        })
        .collect();

    if contributions.is_empty() {
        return 1.0;
    }

    contributions.iter().sum::<f64>() / contributions.len() as f64
}
