use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::SortOrder;
use crate::models::candidate::Stage;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub stage: Stage,
    #[validate(length(min = 1))]
    pub job_id: String,
    pub resume: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub stage: Option<Stage>,
    #[validate(length(min = 1))]
    pub job_id: Option<String>,
    pub resume: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateSort {
    #[default]
    Name,
    Email,
    CreatedAt,
}

impl CandidateSort {
    pub(crate) fn column(self) -> &'static str {
        match self {
            CandidateSort::Name => "name",
            CandidateSort::Email => "email",
            CandidateSort::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<Stage>,
    pub job_id: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<CandidateSort>,
    pub order: Option<SortOrder>,
}
