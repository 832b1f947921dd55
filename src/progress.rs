// src/progress.rs
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::consts::PROGRESS_EVERY;

/// Lightweight progress reporting used by long-running loops (scrape/analyze).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one journal (or archived page) completes, failed or not.
    fn item_done(&mut self, _id: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Logs a throughput/ETA line every `every` items.
pub struct LogProgress {
    started: Instant,
    total: usize,
    done: usize,
    every: usize,
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::every(PROGRESS_EVERY)
    }
}

impl LogProgress {
    pub fn every(every: usize) -> Self {
        Self { started: Instant::now(), total: 0, done: 0, every: every.max(1) }
    }

    pub fn done(&self) -> usize { self.done }

    /// "Resolved 20 jobs in 41 seconds. 980 jobs, 33.5 minutes remaining"
    pub fn status_line(&self, elapsed: Duration) -> String {
        let secs = elapsed.as_secs_f64();
        let per_job = if self.done > 0 { secs / self.done as f64 } else { 0.0 };
        let left = self.total.saturating_sub(self.done);
        format!(
            "Resolved {} jobs in {}. {} jobs, {} remaining",
            self.done,
            duration_string(secs),
            left,
            duration_string(per_job * left as f64)
        )
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.started = Instant::now();
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, _id: &str) {
        self.done += 1;
        if self.done % self.every == 0 {
            info!("{}", self.status_line(self.started.elapsed()));
        }
    }

    fn finish(&mut self) {
        info!("Finished {} jobs in {}", self.done, duration_string(self.started.elapsed().as_secs_f64()));
    }
}

/// Human-readable interval; seconds are truncated first.
pub fn duration_string(secs: f64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;

    let secs = secs.trunc();
    if secs > DAY {
        format!("{:.1} days", secs / DAY)
    } else if secs > HOUR {
        format!("{:.1} hours", secs / HOUR)
    } else if secs > MINUTE {
        format!("{:.1} minutes", secs / MINUTE)
    } else {
        format!("{} seconds", secs as u64)
    }
}
