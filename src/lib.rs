pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use sqlx::SqlitePool;

use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    job_service::JobService, note_service::NoteService, seed_service::SeedService,
    simulation::NetworkSimulation,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub assessment_service: AssessmentService,
    pub note_service: NoteService,
    pub seed_service: SeedService,
}

impl AppState {
    pub fn new(pool: SqlitePool, sim: NetworkSimulation) -> Self {
        let job_service = JobService::new(pool.clone(), sim.clone());
        let candidate_service = CandidateService::new(pool.clone(), sim.clone());
        let assessment_service = AssessmentService::new(pool.clone(), sim.clone());
        let note_service = NoteService::new(pool.clone(), sim);
        let seed_service = SeedService::new(pool.clone());

        Self {
            pool,
            job_service,
            candidate_service,
            assessment_service,
            note_service,
            seed_service,
        }
    }
}
