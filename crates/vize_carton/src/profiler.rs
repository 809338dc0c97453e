//! Minimal wall-clock scoped timer for diagnosing slow compiles.
//!
//! Not wired into a metrics backend; `elapsed()` is read by callers that
//! want to log a duration (e.g. the CLI's `--perf` flag in the full tool).

use std::time::{Duration, Instant};

pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
