use std::fs::{File, OpenOptions};
use std::io::{self, Write};

use tracing::warn;

use crate::trace::trace::TraceEvent;

/// Session trace sink: one JSON object per line, appended.
///
/// Owned by the single-threaded [`App`](crate::app::app::App); write
/// failures are returned so the owner decides whether to keep tracing.
#[derive(Default)]
pub struct TraceLogger {
    file: Option<File>,
}

impl TraceLogger {
    /// Open `path` for appending. An unopenable path gives a disabled logger.
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self { file: Some(file) },
            Err(e) => {
                warn!(path, error = %e, "could not open trace file, session trace disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append one event. A disabled logger accepts and drops it.
    pub fn log(&mut self, event: &TraceEvent) -> io::Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        let line = serde_json::to_string(event)?;
        writeln!(file, "{}", line)
    }
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLogger")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
