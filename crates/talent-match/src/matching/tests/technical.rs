use super::common::*;
use crate::matching::domain::SkillCategory;
use crate::matching::scoring::technical_score;

#[test]
fn no_technical_requirements_is_a_perfect_score() {
    let requirements = vec![requirement("Teamwork", SkillCategory::Soft, 3, false)];

    assert_eq!(technical_score(&[], &requirements, today()), 1.0);
    assert_eq!(technical_score(&[], &[], today()), 1.0);
}

#[test]
fn recent_skill_at_required_level_scores_full() {
    let skills = vec![technical("Rust", 3, Some(months_ago(2)))];
    let requirements = vec![requirement("Rust", SkillCategory::Technical, 3, true)];

    assert_eq!(technical_score(&skills, &requirements, today()), 1.0);
}

#[test]
fn over_qualification_never_exceeds_full_credit() {
    let skills = vec![technical("Rust", 6, Some(months_ago(1)))];
    let requirements = vec![requirement("Rust", SkillCategory::Technical, 3, false)];

    assert_eq!(technical_score(&skills, &requirements, today()), 1.0);
}

#[test]
fn recency_scales_the_level_ratio() {
    let requirements = vec![requirement("SQL", SkillCategory::Technical, 2, false)];

    let stale = vec![technical("SQL", 2, Some(months_ago(10)))];
    let unknown = vec![technical("SQL", 1, None)];

    assert!((technical_score(&stale, &requirements, today()) - 0.8).abs() < 1e-9);
    assert!((technical_score(&unknown, &requirements, today()) - 0.25).abs() < 1e-9);
}

#[test]
fn unmet_critical_requirement_costs_more_than_unmet_ordinary_one() {
    let skills = vec![technical("Rust", 3, Some(months_ago(1)))];

    let with_critical_gap = vec![
        requirement("Rust", SkillCategory::Technical, 3, false),
        requirement("Kubernetes", SkillCategory::Technical, 2, true),
    ];
    let with_ordinary_gap = vec![
        requirement("Rust", SkillCategory::Technical, 3, false),
        requirement("Kubernetes", SkillCategory::Technical, 2, false),
    ];

    let critical = technical_score(&skills, &with_critical_gap, today());
    let ordinary = technical_score(&skills, &with_ordinary_gap, today());

    assert!((critical - 0.4).abs() < 1e-9);
    assert!((ordinary - 0.5).abs() < 1e-9);
    assert!(critical < ordinary);
}

#[test]
fn soft_skill_with_same_name_does_not_satisfy_technical_requirement() {
    let skills = vec![soft("Rust", 5)];
    let requirements = vec![requirement("Rust", SkillCategory::Technical, 1, false)];

    assert_eq!(technical_score(&skills, &requirements, today()), 0.0);
}

#[test]
fn missing_every_skill_scores_zero() {
    let requirements = vec![
        requirement("Go", SkillCategory::Technical, 2, true),
        requirement("Docker", SkillCategory::Technical, 2, false),
    ];

    assert_eq!(technical_score(&[], &requirements, today()), 0.0);
}
