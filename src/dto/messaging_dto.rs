use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::message::Channel;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessagesPayload {
    #[serde(rename = "candidateId")]
    #[validate(length(min = 1))]
    pub candidate_id: String,
    #[serde(rename = "templateId")]
    pub template_id: Option<String>,
    #[validate(length(min = 1, message = "at least one channel is required"))]
    pub channels: Vec<Channel>,
    pub subject: Option<String>,
    pub body: Option<String>,
    /// Caller-supplied variables; highest precedence in the merge.
    pub vars: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScheduleInterviewPayload {
    #[serde(rename = "candidateId")]
    #[validate(length(min = 1))]
    pub candidate_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub stakeholders: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyPayload {
    #[serde(default)]
    pub content: String,
}
