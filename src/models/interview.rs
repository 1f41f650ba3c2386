use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewEvent {
    pub id: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub stakeholders: Vec<String>,
    pub link: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
