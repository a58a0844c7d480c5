use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::candidate_dto::{
    CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload,
};
use crate::dto::{Page, SortOrder};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateTimelineEvent, Stage};
use crate::models::job::Job;
use crate::services::job_service::JOB_COLUMNS;
use crate::services::simulation::NetworkSimulation;
use crate::utils::{id, time};

const CANDIDATE_COLUMNS: &str =
    "id, name, email, phone, stage, job_id, resume, linkedin, portfolio, notes, created_at, updated_at";

const TIMELINE_COLUMNS: &str = "id, candidate_id, stage, timestamp, notes, user_id";

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
    sim: NetworkSimulation,
}

impl CandidateService {
    pub fn new(pool: SqlitePool, sim: NetworkSimulation) -> Self {
        Self { pool, sim }
    }

    /// Same query semantics as the job list: ascending load, in-memory
    /// filters, reversal for descending, then the page slice.
    pub async fn list(&self, query: CandidateListQuery) -> Result<Page<Candidate>> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(10).clamp(1, 100);
        let sort = query.sort.unwrap_or_default();
        let order = query.order.unwrap_or_default();

        let sql = format!(
            "SELECT {} FROM candidates ORDER BY {} ASC, id ASC",
            CANDIDATE_COLUMNS,
            sort.column()
        );
        let mut candidates = sqlx::query_as::<_, Candidate>(&sql)
            .fetch_all(&self.pool)
            .await?;

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            candidates.retain(|candidate| {
                candidate.name.to_lowercase().contains(&needle)
                    || candidate.email.to_lowercase().contains(&needle)
            });
        }
        if let Some(stage) = query.stage {
            candidates.retain(|candidate| candidate.stage == stage);
        }
        if let Some(job_id) = query.job_id.as_deref() {
            candidates.retain(|candidate| candidate.job_id == job_id);
        }
        if order == SortOrder::Desc {
            candidates.reverse();
        }

        let total = candidates.len() as i64;
        let total_pages = ((total as f64) / (page_size as f64)).ceil() as i64;
        let start = ((page - 1) * page_size) as usize;
        let data: Vec<Candidate> = candidates
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(Page {
            data,
            total,
            page,
            page_size,
            total_pages,
        })
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Candidate>> {
        let sql = format!("SELECT {} FROM candidates WHERE id = ?", CANDIDATE_COLUMNS);
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let now = time::now();
        let candidate = Candidate {
            id: id::synthesize("candidate"),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            stage: payload.stage,
            job_id: payload.job_id,
            resume: payload.resume,
            linkedin: payload.linkedin,
            portfolio: payload.portfolio,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO candidates (id, name, email, phone, stage, job_id, resume, linkedin, portfolio, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(candidate.stage)
        .bind(&candidate.job_id)
        .bind(&candidate.resume)
        .bind(&candidate.linkedin)
        .bind(&candidate.portfolio)
        .bind(&candidate.notes)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(candidate)
    }

    /// Sole path for stage transitions. Deliberately does NOT append a
    /// timeline event; callers wanting an audit trail invoke
    /// `add_timeline_event` (or `move_stage`) themselves.
    pub async fn update(&self, id: &str, payload: UpdateCandidatePayload) -> Result<Candidate> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let mut tx = self.pool.begin().await?;
        let sql = format!("SELECT {} FROM candidates WHERE id = ?", CANDIDATE_COLUMNS);
        let mut candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;

        if let Some(name) = payload.name {
            candidate.name = name;
        }
        if let Some(email) = payload.email {
            candidate.email = email;
        }
        if let Some(phone) = payload.phone {
            candidate.phone = Some(phone);
        }
        if let Some(stage) = payload.stage {
            candidate.stage = stage;
        }
        if let Some(job_id) = payload.job_id {
            candidate.job_id = job_id;
        }
        if let Some(resume) = payload.resume {
            candidate.resume = Some(resume);
        }
        if let Some(linkedin) = payload.linkedin {
            candidate.linkedin = Some(linkedin);
        }
        if let Some(portfolio) = payload.portfolio {
            candidate.portfolio = Some(portfolio);
        }
        if let Some(notes) = payload.notes {
            candidate.notes = Some(notes);
        }
        candidate.updated_at = time::now();

        sqlx::query(
            "UPDATE candidates
             SET name = ?, email = ?, phone = ?, stage = ?, job_id = ?, resume = ?,
                 linkedin = ?, portfolio = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(candidate.stage)
        .bind(&candidate.job_id)
        .bind(&candidate.resume)
        .bind(&candidate.linkedin)
        .bind(&candidate.portfolio)
        .bind(&candidate.notes)
        .bind(candidate.updated_at)
        .bind(&candidate.id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(candidate)
    }

    /// Append-only audit record of a stage transition.
    pub async fn add_timeline_event(
        &self,
        candidate_id: &str,
        stage: Stage,
        notes: Option<String>,
        user_id: Option<String>,
    ) -> Result<CandidateTimelineEvent> {
        self.sim.write_gate().await?;

        let event = CandidateTimelineEvent {
            id: id::synthesize("timeline"),
            candidate_id: candidate_id.to_string(),
            stage,
            timestamp: time::now(),
            notes,
            user_id,
        };

        sqlx::query(
            "INSERT INTO candidate_timeline (id, candidate_id, stage, timestamp, notes, user_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&event.id)
        .bind(&event.candidate_id)
        .bind(event.stage)
        .bind(event.timestamp)
        .bind(&event.notes)
        .bind(&event.user_id)
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    /// Convenience for the kanban flow: stage update plus one timeline
    /// event. Two gated writes; the event can be lost if the second one
    /// draws a failure.
    pub async fn move_stage(
        &self,
        id: &str,
        stage: Stage,
        notes: Option<String>,
    ) -> Result<Candidate> {
        let candidate = self
            .update(
                id,
                UpdateCandidatePayload {
                    stage: Some(stage),
                    ..Default::default()
                },
            )
            .await?;
        let note = notes.unwrap_or_else(|| format!("Stage changed to {}", stage));
        self.add_timeline_event(id, stage, Some(note), None).await?;
        Ok(candidate)
    }

    pub async fn timeline(&self, candidate_id: &str) -> Result<Vec<CandidateTimelineEvent>> {
        let sql = format!(
            "SELECT {} FROM candidate_timeline WHERE candidate_id = ? ORDER BY timestamp ASC, id ASC",
            TIMELINE_COLUMNS
        );
        let events = sqlx::query_as::<_, CandidateTimelineEvent>(&sql)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    /// Cross-entity read. A dangling job reference resolves to `None`
    /// rather than an error.
    pub async fn job_for(&self, candidate_id: &str) -> Result<Option<Job>> {
        let candidate = self
            .find_by_id(candidate_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", candidate_id)))?;

        let sql = format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&candidate.job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job.is_none() {
            tracing::debug!(
                candidate_id,
                job_id = %candidate.job_id,
                "candidate references a missing job"
            );
        }
        Ok(job)
    }
}
