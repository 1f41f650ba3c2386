use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditKind {
    Send,
    Schedule,
    Template,
    Auth,
    Gdpr,
    Candidate,
}

/// Append-only record of a store mutation. Entries are never updated or
/// removed; reads are capped at the newest [`crate::services::store::AUDIT_READ_LIMIT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AuditKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonValue>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
