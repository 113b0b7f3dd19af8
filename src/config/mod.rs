mod store;
use serde::{Deserialize, Serialize};

pub use store::ConfigStore;

/// Connection credentials of the hosted database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Project endpoint URL
    pub url: String,
    /// Access key sent with every request
    pub key: String,
}

/// Persisted application configuration
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Endpoint URL of the hosted database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,
    /// Access key of the hosted database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_key: Option<String>,
    /// Submission workflow settings
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    /// Both credentials, or `None` if either is missing or blank
    pub fn credentials(&self) -> Option<Credentials> {
        let url = self.supabase_url.as_deref().map(str::trim).unwrap_or("");
        let key = self.supabase_key.as_deref().map(str::trim).unwrap_or("");
        if url.is_empty() || key.is_empty() {
            return None;
        }
        Some(Credentials {
            url: url.to_string(),
            key: key.to_string(),
        })
    }
}

/// Settings of the add-task workflow
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// What to do when the duplicate lookup itself fails
    #[serde(default)]
    pub duplicate_check: DuplicateCheck,
}

/// Behavior of the duplicate lookup when the backend call fails
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Treat a failed lookup as "no duplicate" and let the insert proceed
    #[default]
    FailOpen,
    /// Abort the submission with the lookup error
    FailClosed,
}
