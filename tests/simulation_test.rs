use std::sync::Arc;
use std::time::{Duration, Instant};

use mockall::mock;
use talentflow_backend::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload};
use talentflow_backend::error::Error;
use talentflow_backend::models::candidate::Stage;
use talentflow_backend::services::simulation::{
    FaultSource, NetworkSimulation, SimulationProfile,
};
use talentflow_backend::AppState;

mock! {
    Faults {}

    impl FaultSource for Faults {
        fn next_delay(&self) -> Duration;
        fn should_fail(&self) -> bool;
    }
}

async fn state_with(sim: NetworkSimulation) -> AppState {
    let pool = talentflow_backend::database::pool::create_pool("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    AppState::new(pool, sim)
}

fn candidate_payload(i: usize) -> CreateCandidatePayload {
    CreateCandidatePayload {
        name: format!("Candidate {}", i),
        email: format!("candidate{}@example.com", i),
        phone: None,
        stage: Stage::Applied,
        job_id: "job-1".to_string(),
        resume: None,
        linkedin: None,
        portfolio: None,
        notes: None,
    }
}

#[tokio::test]
async fn a_failing_fault_source_rejects_every_write_and_leaves_the_store_untouched() {
    let mut faults = MockFaults::new();
    faults.expect_next_delay().return_const(Duration::ZERO);
    faults.expect_should_fail().return_const(true);

    let state = state_with(NetworkSimulation::with_source(Arc::new(faults))).await;

    for i in 0..5 {
        let result = state.candidate_service.create(candidate_payload(i)).await;
        match result {
            Err(Error::TransientNetwork) => {
                assert!(Error::TransientNetwork.is_retryable());
            }
            other => panic!("expected TransientNetwork, got {:?}", other.map(|c| c.id)),
        }
    }

    // Reads are not gated and see an untouched store.
    let page = state
        .candidate_service
        .list(CandidateListQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn a_passing_fault_source_never_injects() {
    let mut faults = MockFaults::new();
    faults.expect_next_delay().return_const(Duration::ZERO);
    faults.expect_should_fail().return_const(false);

    let state = state_with(NetworkSimulation::with_source(Arc::new(faults))).await;

    for i in 0..20 {
        state
            .candidate_service
            .create(candidate_payload(i))
            .await
            .expect("create");
    }

    let page = state
        .candidate_service
        .list(CandidateListQuery {
            page_size: Some(100),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(page.total, 20);
}

#[tokio::test]
async fn seeded_faults_fail_a_statistically_bounded_share_of_writes() {
    let sim = NetworkSimulation::new(SimulationProfile {
        latency_min: Duration::ZERO,
        latency_max: Duration::ZERO,
        failure_rate_min: 0.05,
        failure_rate_max: 0.10,
        seed: Some(42),
    });
    let state = state_with(sim).await;

    let mut failures = 0;
    let mut successes = 0;
    for i in 0..200 {
        match state.candidate_service.create(candidate_payload(i)).await {
            Ok(_) => successes += 1,
            Err(Error::TransientNetwork) => failures += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(failures + successes, 200);
    // 5-10% of 200 writes, with generous slack around the binomial spread.
    assert!(
        (4..=34).contains(&failures),
        "failure count {} outside the expected band",
        failures
    );

    let page = state
        .candidate_service
        .list(CandidateListQuery {
            page_size: Some(100),
            page: Some(1),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(page.total, i64::from(successes));
}

#[tokio::test]
async fn the_write_gate_suspends_for_the_configured_latency() {
    let sim = NetworkSimulation::new(SimulationProfile {
        latency_min: Duration::from_millis(25),
        latency_max: Duration::from_millis(25),
        failure_rate_min: 0.0,
        failure_rate_max: 0.0,
        seed: Some(1),
    });
    let state = state_with(sim).await;

    let started = Instant::now();
    state
        .candidate_service
        .create(candidate_payload(0))
        .await
        .expect("create");
    assert!(started.elapsed() >= Duration::from_millis(25));
}
