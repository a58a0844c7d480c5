pub mod assessment_dto;
pub mod candidate_dto;
pub mod job_dto;
pub mod note_dto;

use serde::{Deserialize, Serialize};

/// A bounded slice of a filtered, sorted result set. `total` counts the
/// filtered rows before pagination.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
