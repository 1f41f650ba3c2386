use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::interview::InterviewEvent;
use crate::models::message::Message;

/// Pipeline position of a candidate. Offer and Reject are only ever set
/// through direct profile edits, never by the scheduling heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Applied,
    Screening,
    Interview,
    Offer,
    Reject,
}

impl Stage {
    /// Stage advancement applied on every successful interview scheduling.
    /// One step at a time, never backwards, stops at Interview.
    pub fn next_on_schedule(self) -> Stage {
        match self {
            Stage::Applied => Stage::Screening,
            Stage::Screening => Stage::Interview,
            other => other,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Applied
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub role_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates: Option<Vec<String>>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_feedback: Option<String>,
    pub stage: Stage,
    /// Interview events, newest first.
    pub timeline: Vec<InterviewEvent>,
    /// Outbound and inbound messages, newest first.
    pub messages: Vec<Message>,
    pub gdpr_consent: bool,
    pub data_retention_consent: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Candidate {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_heuristic_advances_one_step() {
        assert_eq!(Stage::Applied.next_on_schedule(), Stage::Screening);
        assert_eq!(Stage::Screening.next_on_schedule(), Stage::Interview);
    }

    #[test]
    fn schedule_heuristic_is_idempotent_at_terminal_stages() {
        assert_eq!(Stage::Interview.next_on_schedule(), Stage::Interview);
        assert_eq!(Stage::Offer.next_on_schedule(), Stage::Offer);
        assert_eq!(Stage::Reject.next_on_schedule(), Stage::Reject);
    }
}
