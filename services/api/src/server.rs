use crate::cli::ServeArgs;
use crate::infra::{seeded_repository, AppState};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::matching::{HashingEmbeddingProvider, MatchingApi, MatchingService};
use talent_match::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(seeded_repository(Local::now().date_naive()));
    let provider = Arc::new(HashingEmbeddingProvider::new(
        config.matching.embedding_dimension,
    ));
    let service = Arc::new(MatchingService::new(repository, provider));
    let api = MatchingApi::new(service, &config.matching);

    let app = with_matching_routes(api)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_concurrent_evaluations = config.matching.max_concurrent_evaluations,
        "talent match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
