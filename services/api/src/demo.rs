use crate::infra::{parse_date, seeded_repository, BACKEND_OFFER};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;
use std::sync::Arc;
use talent_match::config::{AppConfig, MatchingConfig};
use talent_match::error::AppError;
use talent_match::matching::{
    CandidateId, EvaluationClock, HashingEmbeddingProvider, InMemoryTalentRepository,
    MatchingService, OfferId,
};

type DemoService = MatchingService<InMemoryTalentRepository, HashingEmbeddingProvider>;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Candidate identifier (email) from the seeded talent pool
    #[arg(long)]
    pub(crate) candidate: String,
    /// Offer identifier from the seeded talent pool
    #[arg(long)]
    pub(crate) offer: String,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Offer identifier from the seeded talent pool
    #[arg(long)]
    pub(crate) offer: String,
    /// Number of candidates to list. Defaults to MATCH_RANKING_LIMIT.
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn demo_service(
    config: &MatchingConfig,
    today: NaiveDate,
) -> (Arc<InMemoryTalentRepository>, DemoService) {
    let repository = Arc::new(seeded_repository(today));
    let provider = Arc::new(HashingEmbeddingProvider::new(config.embedding_dimension));
    let service = MatchingService::new(Arc::clone(&repository), provider)
        .with_clock(EvaluationClock::Fixed(today));
    (repository, service)
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let (_, service) = demo_service(&config.matching, today);

    let evaluation = service.evaluate(&CandidateId(args.candidate), &OfferId(args.offer))?;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let limit = args.limit.unwrap_or(config.matching.ranking_limit);
    let (repository, service) = demo_service(&config.matching, today);

    let offer_id = OfferId(args.offer);
    service.evaluate_offer(&offer_id, &repository.candidate_ids())?;
    let ranking = service.ranking(&offer_id, limit)?;

    let payload = json!({
        "offer_id": offer_id,
        "candidates": ranking,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let (repository, service) = demo_service(&config.matching, today);
    let offer_id = OfferId(BACKEND_OFFER.to_string());

    println!("Candidate matching demo (evaluated on {today})");
    let evaluations = service.evaluate_offer(&offer_id, &repository.candidate_ids())?;
    for evaluation in &evaluations {
        let scores = evaluation.result.breakdown();
        println!(
            "- {} vs {}: final {:.2} | technical {:.2} | soft {:.2} | experience {:.2}",
            evaluation.candidate_name,
            evaluation.offer_title,
            scores.final_score,
            scores.technical_score,
            scores.soft_score,
            scores.experience_score
        );
    }

    println!("\nRanking for {offer_id}");
    let ranking = service.ranking(&offer_id, config.matching.ranking_limit)?;
    println!("{}", serde_json::to_string_pretty(&ranking)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
    }

    #[test]
    fn demo_service_ranks_backend_offer() {
        let (repository, service) = demo_service(&MatchingConfig::default(), anchor());
        let offer_id = OfferId(BACKEND_OFFER.to_string());

        let evaluations = service
            .evaluate_offer(&offer_id, &repository.candidate_ids())
            .expect("batch succeeds");
        assert_eq!(evaluations.len(), 3);

        let ranking = service.ranking(&offer_id, 2).expect("ranking");
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].candidate_name, "Lucia Gomez");
        assert!(ranking[0].scores.final_score >= ranking[1].scores.final_score);
    }
}
