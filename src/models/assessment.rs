use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: String,
    /// At most one assessment exists per job, enforced by the save path's
    /// upsert rather than a store-level constraint.
    pub job_id: String,
    pub title: String,
    pub description: Option<String>,
    pub sections: Json<Vec<AssessmentSection>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSection {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub order: i64,
    pub questions: Vec<AssessmentQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    /// Choice kinds only.
    pub options: Option<Vec<String>>,
    /// Numeric kind only.
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Text kinds only.
    pub max_length: Option<i64>,
    /// Conditional visibility, evaluated by the consuming form.
    pub conditional: Option<ConditionalRule>,
    pub order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    ShortText,
    LongText,
    Numeric,
    FileUpload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub question_id: String,
    pub operator: ConditionOperator,
    pub value: JsonValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentResponse {
    pub id: String,
    pub assessment_id: String,
    pub candidate_id: String,
    pub responses: Json<Vec<QuestionResponse>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: String,
    pub value: JsonValue,
    pub submitted_at: DateTime<Utc>,
}
