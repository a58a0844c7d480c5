use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub candidate_id: String,
    pub content: String,
    /// Referenced names or ids, as typed by the author.
    pub mentions: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}
