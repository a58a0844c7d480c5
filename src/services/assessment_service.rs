use sqlx::types::Json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::assessment_dto::{SaveAssessmentPayload, SubmitResponsePayload};
use crate::error::{Error, Result};
use crate::models::assessment::{Assessment, AssessmentResponse};
use crate::services::simulation::NetworkSimulation;
use crate::utils::{id, time};

const ASSESSMENT_COLUMNS: &str =
    "id, job_id, title, description, sections, created_at, updated_at";

const RESPONSE_COLUMNS: &str =
    "id, assessment_id, candidate_id, responses, submitted_at, created_at";

#[derive(Clone)]
pub struct AssessmentService {
    pool: SqlitePool,
    sim: NetworkSimulation,
}

impl AssessmentService {
    pub fn new(pool: SqlitePool, sim: NetworkSimulation) -> Self {
        Self { pool, sim }
    }

    pub async fn get_by_job(&self, job_id: &str) -> Result<Option<Assessment>> {
        let sql = format!(
            "SELECT {} FROM assessments WHERE job_id = ? LIMIT 1",
            ASSESSMENT_COLUMNS
        );
        let assessment = sqlx::query_as::<_, Assessment>(&sql)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(assessment)
    }

    /// Upsert keyed by job id, enforced by query-then-branch rather than a
    /// store constraint: a second save for the same job updates the first
    /// save's row, keeping its id.
    pub async fn save(&self, job_id: &str, payload: SaveAssessmentPayload) -> Result<Assessment> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "SELECT {} FROM assessments WHERE job_id = ? LIMIT 1",
            ASSESSMENT_COLUMNS
        );
        let existing = sqlx::query_as::<_, Assessment>(&sql)
            .bind(job_id)
            .fetch_optional(&mut *tx)
            .await?;

        let assessment = match existing {
            Some(mut assessment) => {
                assessment.title = payload.title;
                assessment.description = payload.description;
                assessment.sections = Json(payload.sections);
                assessment.updated_at = time::now();

                sqlx::query(
                    "UPDATE assessments SET title = ?, description = ?, sections = ?, updated_at = ? WHERE id = ?",
                )
                .bind(&assessment.title)
                .bind(&assessment.description)
                .bind(&assessment.sections)
                .bind(assessment.updated_at)
                .bind(&assessment.id)
                .execute(&mut *tx)
                .await?;

                assessment
            }
            None => {
                let now = time::now();
                let assessment = Assessment {
                    id: id::synthesize("assessment"),
                    job_id: job_id.to_string(),
                    title: payload.title,
                    description: payload.description,
                    sections: Json(payload.sections),
                    created_at: now,
                    updated_at: now,
                };

                sqlx::query(
                    "INSERT INTO assessments (id, job_id, title, description, sections, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&assessment.id)
                .bind(&assessment.job_id)
                .bind(&assessment.title)
                .bind(&assessment.description)
                .bind(&assessment.sections)
                .bind(assessment.created_at)
                .bind(assessment.updated_at)
                .execute(&mut *tx)
                .await?;

                assessment
            }
        };
        tx.commit().await?;

        Ok(assessment)
    }

    /// Always creates a new response row; never an upsert.
    pub async fn submit_response(
        &self,
        job_id: &str,
        payload: SubmitResponsePayload,
    ) -> Result<AssessmentResponse> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let assessment = self
            .get_by_job(job_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No assessment for job {}", job_id)))?;

        let response = AssessmentResponse {
            id: id::synthesize("response"),
            assessment_id: assessment.id,
            candidate_id: payload.candidate_id,
            responses: Json(payload.responses),
            submitted_at: payload.submitted_at,
            created_at: time::now(),
        };

        sqlx::query(
            "INSERT INTO assessment_responses (id, assessment_id, candidate_id, responses, submitted_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&response.id)
        .bind(&response.assessment_id)
        .bind(&response.candidate_id)
        .bind(&response.responses)
        .bind(response.submitted_at)
        .bind(response.created_at)
        .execute(&self.pool)
        .await?;

        Ok(response)
    }

    pub async fn responses_for_assessment(
        &self,
        assessment_id: &str,
    ) -> Result<Vec<AssessmentResponse>> {
        let sql = format!(
            "SELECT {} FROM assessment_responses WHERE assessment_id = ? ORDER BY created_at ASC, id ASC",
            RESPONSE_COLUMNS
        );
        let responses = sqlx::query_as::<_, AssessmentResponse>(&sql)
            .bind(assessment_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(responses)
    }
}
