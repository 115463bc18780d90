use std::time::Duration;

use tracing::debug;

pub const DEFAULT_STEP: u8 = 10;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupEvent {
    /// Progress moved to the given percentage
    Progress(u8),
    /// Fired exactly once, on the first advance after progress reached 100
    Ready,
    /// Sequence already finished; nothing changes
    Inert,
}

/// Splash-screen progress gate.
///
/// A pure counter: the caller drives it by calling [`advance`](Self::advance)
/// after waiting [`next_delay`](Self::next_delay). Never restarts.
#[derive(Debug, Clone)]
pub struct StartupSequencer {
    progress: u8,
    ready: bool,
    step: u8,
    tick_interval: Duration,
    settle_delay: Duration,
}

impl Default for StartupSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, DEFAULT_TICK_INTERVAL, DEFAULT_SETTLE_DELAY)
    }
}

impl StartupSequencer {
    pub fn new(step: u8, tick_interval: Duration, settle_delay: Duration) -> Self {
        Self {
            progress: 0,
            ready: false,
            step: step.clamp(1, 100),
            tick_interval,
            settle_delay,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// How long the scheduler should wait before the next advance.
    /// `None` once the sequence is finished.
    pub fn next_delay(&self) -> Option<Duration> {
        if self.ready {
            None
        } else if self.progress < 100 {
            Some(self.tick_interval)
        } else {
            Some(self.settle_delay)
        }
    }

    pub fn advance(&mut self) -> StartupEvent {
        if self.ready {
            return StartupEvent::Inert;
        }

        if self.progress < 100 {
            self.progress = self.progress.saturating_add(self.step).min(100);
            debug!(progress = self.progress, "startup progress");
            return StartupEvent::Progress(self.progress);
        }

        self.ready = true;
        debug!("startup sequence ready");
        StartupEvent::Ready
    }
}
