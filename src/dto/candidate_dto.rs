use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::Stage;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    #[validate(length(min = 1))]
    pub role_title: String,
    pub resume_url: Option<String>,
    pub portfolio_links: Option<Vec<String>>,
    pub certificates: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub skills: Vec<String>,
    pub notes: Option<String>,
    pub stage: Option<Stage>,
}

/// Candidate-portal profile edit. The field set doubles as the allow-list:
/// anything not listed here (stage, notes, role_title, …) cannot be changed
/// from the portal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct ProfileUpdatePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub portfolio_links: Option<Vec<String>>,
    pub certificates: Option<Vec<String>>,
    pub gdpr_consent: Option<bool>,
    pub data_retention_consent: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateAuthPayload {
    #[validate(length(min = 1))]
    pub email: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyActionPayload {
    pub action: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub gdpr_consent: Option<bool>,
    pub data_retention_consent: Option<bool>,
}
