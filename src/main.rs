use std::time::Duration;

use talentflow_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    dto::candidate_dto::CandidateListQuery,
    dto::job_dto::JobListQuery,
    models::candidate::Stage,
    services::seed_service::SeedProfile,
    services::simulation::{NetworkSimulation, SimulationProfile},
    AppState,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let sim = NetworkSimulation::new(SimulationProfile {
        latency_min: Duration::from_millis(config.latency_min_ms),
        latency_max: Duration::from_millis(config.latency_max_ms),
        failure_rate_min: config.failure_rate_min,
        failure_rate_max: config.failure_rate_max,
        seed: config.fault_seed,
    });
    let state = AppState::new(pool, sim);

    state
        .seed_service
        .seed_if_empty(&SeedProfile {
            candidates: config.seed_candidates,
            seed: config.seed_rng,
        })
        .await?;

    let jobs = state
        .job_service
        .list(JobListQuery {
            page_size: Some(5),
            ..Default::default()
        })
        .await?;
    info!(total = jobs.total, pages = jobs.total_pages, "jobs ready");

    let candidates = state
        .candidate_service
        .list(CandidateListQuery {
            page_size: Some(5),
            ..Default::default()
        })
        .await?;
    info!(total = candidates.total, "candidates ready");

    // Smoke-check the pipeline path, including the simulated network: a
    // transient failure here is expected behavior, not a crash.
    if let Some(candidate) = candidates.data.first() {
        match state
            .candidate_service
            .move_stage(&candidate.id, Stage::Screen, None)
            .await
        {
            Ok(moved) => {
                let events = state.candidate_service.timeline(&moved.id).await?;
                info!(
                    candidate = %moved.name,
                    events = events.len(),
                    "pipeline smoke check passed"
                );
            }
            Err(err) if err.is_retryable() => {
                warn!("simulated network failure surfaced: {}", err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
