use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertTemplatePayload {
    /// When set and matching an existing template, that template's name,
    /// subject and body are replaced; otherwise a new one is created.
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    pub subject: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
}
