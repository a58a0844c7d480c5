use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::assessment::{AssessmentSection, QuestionResponse};

/// Upsert payload for a job's assessment: the builder always sends the full
/// title/description/sections set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveAssessmentPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<AssessmentSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitResponsePayload {
    #[validate(length(min = 1))]
    pub candidate_id: String,
    #[serde(default)]
    pub responses: Vec<QuestionResponse>,
    pub submitted_at: Option<DateTime<Utc>>,
}
