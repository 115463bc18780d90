use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{client::RecommendationApi, error::ApiError, health::HealthReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    #[default]
    Checking,
    Connected,
    Disconnected,
    Error,
}

impl ConnectivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityStatus::Checking => "checking",
            ConnectivityStatus::Connected => "connected",
            ConnectivityStatus::Disconnected => "disconnected",
            ConnectivityStatus::Error => "error",
        }
    }

    /// Header badge text.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityStatus::Connected => "Connected",
            ConnectivityStatus::Checking => "Connecting...",
            ConnectivityStatus::Disconnected | ConnectivityStatus::Error => "Disconnected",
        }
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map one probe outcome onto a status.
///
/// Any success is `Connected`. A response with a failing status is `Error`;
/// no response at all is `Disconnected`.
pub fn classify_probe(outcome: &Result<HealthReport, ApiError>) -> ConnectivityStatus {
    match outcome {
        Ok(_) => ConnectivityStatus::Connected,
        Err(ApiError::Transport { .. }) => ConnectivityStatus::Disconnected,
        Err(ApiError::Status { .. }) => ConnectivityStatus::Error,
        // The service answered with a success code; the body is irrelevant.
        Err(ApiError::Decode { .. }) => ConnectivityStatus::Connected,
    }
}

/// Tracks the service's reachability. Each probe is a single attempt.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityMonitor {
    status: ConnectivityStatus,
    probes: u32,
    last_report: Option<HealthReport>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectivityStatus::Connected
    }

    /// Number of probe outcomes applied so far.
    pub fn probes(&self) -> u32 {
        self.probes
    }

    pub fn last_report(&self) -> Option<&HealthReport> {
        self.last_report.as_ref()
    }

    /// Run one health check against the service and record its outcome.
    pub fn probe(&mut self, api: &dyn RecommendationApi) -> ConnectivityStatus {
        let outcome = api.health();
        self.apply(outcome)
    }

    /// Record a probe outcome obtained elsewhere (e.g. on a worker thread).
    pub fn apply(&mut self, outcome: Result<HealthReport, ApiError>) -> ConnectivityStatus {
        let status = classify_probe(&outcome);
        self.probes += 1;

        match &outcome {
            Ok(report) => {
                info!(status = %status, "health probe succeeded");
                self.last_report = Some(report.clone());
            }
            Err(e) => {
                warn!(status = %status, error = %e, "health probe failed");
                self.last_report = None;
            }
        }

        self.status = status;
        status
    }
}
