use serde::{Deserialize, Serialize};

/// Body of `GET /health`. Only the status code decides connectivity; the
/// body is kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub models: Option<String>,
    #[serde(default)]
    pub models_loading: Option<bool>,
    #[serde(default)]
    pub models_loaded: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthReport {
    /// Parse a health body, yielding an empty report for anything unexpected.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The service answered but reports itself as not fully healthy.
    pub fn is_degraded(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => status != "healthy",
            None => false,
        }
    }
}
