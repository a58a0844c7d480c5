use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Stage {
    Applied,
    Screen,
    Tech,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    /// The conventional forward path. Rejected sits outside it and is
    /// reachable from any stage; no transition table is enforced.
    pub const PIPELINE: [Stage; 5] = [
        Stage::Applied,
        Stage::Screen,
        Stage::Tech,
        Stage::Offer,
        Stage::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "applied",
            Stage::Screen => "screen",
            Stage::Tech => "tech",
            Stage::Offer => "offer",
            Stage::Hired => "hired",
            Stage::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub stage: Stage,
    /// References a job id; integrity is not enforced and dangling
    /// references are tolerated on reads.
    pub job_id: String,
    pub resume: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateTimelineEvent {
    pub id: String,
    pub candidate_id: String,
    pub stage: Stage,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub user_id: Option<String>,
}
