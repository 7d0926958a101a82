use chrono::{Months, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_match::matching::{
    CandidateId, CandidateProfile, CandidateSkill, ExperienceEntry, InMemoryTalentRepository,
    OfferId, OfferProfile, OfferRequirement, ScoreWeights, SkillCategory,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) const BACKEND_OFFER: &str = "offer-backend";
pub(crate) const DATA_OFFER: &str = "offer-data";

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Gateway preloaded with the demo talent pool. Dates are anchored on `anchor`
/// so recency and tenure read the same whenever the dataset is built.
pub(crate) fn seeded_repository(anchor: NaiveDate) -> InMemoryTalentRepository {
    InMemoryTalentRepository::with_profiles(seed_candidates(anchor), seed_offers())
}

fn months_before(anchor: NaiveDate, months: u32) -> NaiveDate {
    anchor
        .checked_sub_months(Months::new(months))
        .unwrap_or(anchor)
}

fn skill(
    name: &str,
    category: SkillCategory,
    level: u32,
    last_used: Option<NaiveDate>,
) -> CandidateSkill {
    CandidateSkill {
        name: name.to_string(),
        category,
        level,
        last_used,
    }
}

fn requirement(
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

fn role(title: &str, start: NaiveDate, end: Option<NaiveDate>) -> ExperienceEntry {
    ExperienceEntry {
        role_title: title.to_string(),
        start_date: start,
        end_date: end,
    }
}

fn seed_offers() -> Vec<OfferProfile> {
    use SkillCategory::{Soft, Technical};

    vec![
        OfferProfile {
            offer_id: OfferId(BACKEND_OFFER.to_string()),
            title: "Backend Engineer".to_string(),
            seniority: "Semi Senior".to_string(),
            min_experience_months: 12,
            weights: ScoreWeights {
                technical: 0.5,
                soft: 0.2,
                experience: 0.3,
            },
            requirements: vec![
                requirement("Python", Technical, 3, true),
                requirement("Teamwork", Soft, 2, false),
            ],
        },
        OfferProfile {
            offer_id: OfferId(DATA_OFFER.to_string()),
            title: "Data Analyst".to_string(),
            seniority: "Senior".to_string(),
            min_experience_months: 24,
            weights: ScoreWeights {
                technical: 0.4,
                soft: 0.3,
                experience: 0.3,
            },
            requirements: vec![
                requirement("SQL", Technical, 4, true),
                requirement("Python", Technical, 2, false),
                requirement("Communication", Soft, 3, false),
            ],
        },
    ]
}

fn seed_candidates(anchor: NaiveDate) -> Vec<CandidateProfile> {
    use SkillCategory::{Soft, Technical};

    vec![
        CandidateProfile {
            candidate_id: CandidateId("lucia@example.com".to_string()),
            full_name: "Lucia Gomez".to_string(),
            skills: vec![
                skill("Python", Technical, 3, Some(months_before(anchor, 2))),
                skill("Teamwork", Soft, 4, None),
            ],
            experiences: vec![role(
                "Senior Backend Engineer",
                months_before(anchor, 30),
                Some(months_before(anchor, 12)),
            )],
        },
        CandidateProfile {
            candidate_id: CandidateId("mateo@example.com".to_string()),
            full_name: "Mateo Silva".to_string(),
            skills: vec![
                skill("SQL", Technical, 4, Some(months_before(anchor, 1))),
                skill("Python", Technical, 2, Some(months_before(anchor, 10))),
                skill("Communication", Soft, 3, None),
            ],
            experiences: vec![role("Data Analyst", months_before(anchor, 40), None)],
        },
        CandidateProfile {
            candidate_id: CandidateId("sofia@example.com".to_string()),
            full_name: "Sofia Ramirez".to_string(),
            skills: vec![
                skill("Python", Technical, 1, Some(months_before(anchor, 30))),
                skill("Teamwork", Soft, 2, None),
            ],
            experiences: vec![role(
                "Pastry Chef",
                months_before(anchor, 72),
                Some(months_before(anchor, 18)),
            )],
        },
    ]
}
