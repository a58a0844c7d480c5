use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    pub tags: Json<Vec<String>>,
    /// Manual ranking key across all jobs, not scoped per status. Ties are
    /// possible after reorders.
    pub order: i64,
    pub description: Option<String>,
    pub requirements: Option<Json<Vec<String>>>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
