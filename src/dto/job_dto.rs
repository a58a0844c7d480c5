use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::SortOrder;
use crate::models::job::JobStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub slug: String,
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(range(min = 0))]
    pub order: i64,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub location: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub slug: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub order: Option<i64>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub location: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderPayload {
    pub from_order: i64,
    pub to_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobSort {
    Title,
    CreatedAt,
    #[default]
    Order,
}

impl JobSort {
    pub(crate) fn column(self) -> &'static str {
        match self {
            JobSort::Title => "title",
            JobSort::CreatedAt => "created_at",
            JobSort::Order => "\"order\"",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<JobSort>,
    pub order: Option<SortOrder>,
}
