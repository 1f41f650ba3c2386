use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reusable message skeleton. Subject and body may contain `{{placeholder}}`
/// tokens resolved at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
