use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One line of the session trace.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub seq: u64,

    pub event: &'static str,
    pub phase: String,

    pub connectivity: String,
    pub submission: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
}

impl TraceEvent {
    pub fn now(
        seq: u64,
        event: &'static str,
        phase: impl ToString,
        connectivity: impl ToString,
        submission: impl ToString,
    ) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            seq,
            event,
            phase: phase.to_string(),
            connectivity: connectivity.to_string(),
            submission: submission.to_string(),
            detail: None,
            tab: None,
        }
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_tab(mut self, tab: impl ToString) -> Self {
        self.tab = Some(tab.to_string());
        self
    }
}
