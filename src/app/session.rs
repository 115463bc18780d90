use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{
    api::{
        client::{HEALTH_PATH, RecommendationApi},
        error::ApiError,
        health::HealthReport,
    },
    app::app::App,
    connectivity::monitor::ConnectivityStatus,
};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opt-in re-probing after the startup probe. Zero attempts keeps the
/// single startup check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReprobePolicy {
    pub attempts: u32,
    pub interval: Duration,
}

/// A startup probe still running when the splash sequence finished.
pub struct PendingProbe {
    rx: Receiver<Result<HealthReport, ApiError>>,
}

impl PendingProbe {
    /// Wait up to `timeout` for the probe. No answer in time counts as a
    /// transport failure; a late answer is dropped.
    pub fn settle(self, app: &mut App, timeout: Duration) -> ConnectivityStatus {
        let outcome = match self.rx.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "startup probe timed out");
                Err(ApiError::Transport {
                    url: HEALTH_PATH.to_string(),
                    message: format!("no response within {} ms", timeout.as_millis()),
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(worker_lost()),
        };
        app.apply_probe(outcome)
    }
}

fn worker_lost() -> ApiError {
    warn!("startup probe worker exited without a result");
    ApiError::Transport {
        url: HEALTH_PATH.to_string(),
        message: "health probe worker exited".to_string(),
    }
}

/// Run the splash sequence with the startup probe in the background.
///
/// Returns as soon as the sequence is ready. A probe answering before that
/// is applied on the way; one still out is handed back as a
/// [`PendingProbe`] and the app stays `Checking` until it is settled.
pub fn run_startup(
    app: &mut App,
    api: Arc<dyn RecommendationApi + Send + Sync>,
) -> Option<PendingProbe> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver is gone once the probe has been given up on.
        let _ = tx.send(api.health());
    });

    let mut probe_done = false;
    let mut next_tick = app
        .startup()
        .next_delay()
        .map(|delay| Instant::now() + delay);

    while let Some(deadline) = next_tick {
        let wait = deadline.saturating_duration_since(Instant::now());
        if probe_done {
            thread::sleep(wait);
        } else {
            match rx.recv_timeout(wait) {
                Ok(outcome) => {
                    app.apply_probe(outcome);
                    probe_done = true;
                    continue;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    app.apply_probe(Err(worker_lost()));
                    probe_done = true;
                }
            }
        }

        let event = app.tick();
        debug!(?event, "startup tick");
        next_tick = app
            .startup()
            .next_delay()
            .map(|delay| Instant::now() + delay);
    }

    if probe_done {
        None
    } else {
        debug!("interface ready before startup probe answered");
        Some(PendingProbe { rx })
    }
}

/// Re-probe while not connected, up to the policy's attempt count.
pub fn reprobe(
    app: &mut App,
    api: &dyn RecommendationApi,
    policy: ReprobePolicy,
) -> ConnectivityStatus {
    let mut attempt = 0;
    while app.connectivity() != ConnectivityStatus::Connected && attempt < policy.attempts {
        attempt += 1;
        thread::sleep(policy.interval);
        debug!(attempt, "re-probing service health");
        app.probe(api);
    }
    app.connectivity()
}
