use std::fmt;

use serde::Serialize;

/// Top-level screen the interface is on. Derived from the component states,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPhase {
    /// Splash screen; the form is not interactive yet
    Starting,
    /// Product form (including while a submission is in flight)
    Form,
    /// Result tabs
    Results,
}

impl AppPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppPhase::Starting => "starting",
            AppPhase::Form => "form",
            AppPhase::Results => "results",
        }
    }
}

impl fmt::Display for AppPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
