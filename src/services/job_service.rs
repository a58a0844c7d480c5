use sqlx::types::Json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::job_dto::{CreateJobPayload, JobListQuery, ReorderPayload, UpdateJobPayload};
use crate::dto::{Page, SortOrder};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::services::simulation::NetworkSimulation;
use crate::utils::{id, time};

pub(crate) const JOB_COLUMNS: &str =
    r#"id, title, slug, status, tags, "order", description, requirements, location, salary, created_at, updated_at"#;

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
    sim: NetworkSimulation,
}

impl JobService {
    pub fn new(pool: SqlitePool, sim: NetworkSimulation) -> Self {
        Self { pool, sim }
    }

    /// Loads the table ordered by the sort column ascending (id as
    /// tie-break), filters in memory, and only then paginates. Descending
    /// output is the exact reverse of the ascending list rather than an
    /// independent descending sort, so the ascending tie-break survives
    /// inversion.
    pub async fn list(&self, query: JobListQuery) -> Result<Page<Job>> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(10).clamp(1, 100);
        let sort = query.sort.unwrap_or_default();
        let order = query.order.unwrap_or_default();

        let sql = format!(
            "SELECT {} FROM jobs ORDER BY {} ASC, id ASC",
            JOB_COLUMNS,
            sort.column()
        );
        let mut jobs = sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?;

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            jobs.retain(|job| {
                job.title.to_lowercase().contains(&needle)
                    || job
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            });
        }
        if let Some(status) = query.status {
            jobs.retain(|job| job.status == status);
        }
        if order == SortOrder::Desc {
            jobs.reverse();
        }

        let total = jobs.len() as i64;
        let total_pages = ((total as f64) / (page_size as f64)).ceil() as i64;
        let start = ((page - 1) * page_size) as usize;
        let data: Vec<Job> = jobs
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

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE slug = ? LIMIT 1", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let now = time::now();
        let job = Job {
            id: id::synthesize("job"),
            title: payload.title,
            slug: payload.slug,
            status: payload.status,
            tags: Json(payload.tags),
            order: payload.order,
            description: payload.description,
            requirements: payload.requirements.map(Json),
            location: payload.location,
            salary: payload.salary,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO jobs (id, title, slug, status, tags, "order", description, requirements, location, salary, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&job.id)
        .bind(&job.title)
        .bind(&job.slug)
        .bind(job.status)
        .bind(&job.tags)
        .bind(job.order)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.location)
        .bind(&job.salary)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    /// Shallow merge: provided fields overwrite, omitted fields are kept,
    /// and `updated_at` always refreshes.
    pub async fn update(&self, id: &str, payload: UpdateJobPayload) -> Result<Job> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let mut tx = self.pool.begin().await?;
        let sql = format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS);
        let mut job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))?;

        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(slug) = payload.slug {
            job.slug = slug;
        }
        if let Some(status) = payload.status {
            job.status = status;
        }
        if let Some(tags) = payload.tags {
            job.tags = Json(tags);
        }
        if let Some(order) = payload.order {
            job.order = order;
        }
        if let Some(description) = payload.description {
            job.description = Some(description);
        }
        if let Some(requirements) = payload.requirements {
            job.requirements = Some(Json(requirements));
        }
        if let Some(location) = payload.location {
            job.location = Some(location);
        }
        if let Some(salary) = payload.salary {
            job.salary = Some(salary);
        }
        job.updated_at = time::now();

        self.persist(&mut tx, &job).await?;
        tx.commit().await?;

        Ok(job)
    }

    /// Writes `to_order` onto the one job; sibling jobs are never
    /// renumbered, so ties in `order` are possible afterwards.
    pub async fn reorder(&self, id: &str, payload: ReorderPayload) -> Result<Job> {
        self.sim.write_gate().await?;

        let mut tx = self.pool.begin().await?;
        let sql = format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS);
        let mut job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))?;

        job.order = payload.to_order;
        job.updated_at = time::now();

        self.persist(&mut tx, &job).await?;
        tx.commit().await?;

        Ok(job)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.sim.write_gate().await?;

        sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn persist(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        job: &Job,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE jobs
               SET title = ?, slug = ?, status = ?, tags = ?, "order" = ?, description = ?,
                   requirements = ?, location = ?, salary = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&job.title)
        .bind(&job.slug)
        .bind(job.status)
        .bind(&job.tags)
        .bind(job.order)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.location)
        .bind(&job.salary)
        .bind(job.updated_at)
        .bind(&job.id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
