use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotePayload {
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[validate(length(min = 1))]
    pub created_by: String,
}
