//! Summary rollup for a finished run.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::TaskError;
use crate::runner::queue::TaskOutcome;

/// Counts derived from a finished run's outcomes
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub elapsed_ms: u64,
    pub workers: usize,
}

impl RunReport {
    pub fn from_outcomes<R>(outcomes: &[TaskOutcome<R>], elapsed: Duration, workers: usize) -> Self {
        let mut report = RunReport {
            total: outcomes.len(),
            elapsed_ms: elapsed.as_millis() as u64,
            workers,
            ..Default::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(_) => report.succeeded += 1,
                Err(TaskError::Cancelled) => report.cancelled += 1,
                Err(_) => report.failed += 1,
            }
        }
        report
    }

    /// True when every slot succeeded
    pub fn all_ok(&self) -> bool {
        self.succeeded == self.total
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items: {} ok, {} failed",
            self.total, self.succeeded, self.failed
        )?;
        if self.cancelled > 0 {
            write!(f, ", {} cancelled", self.cancelled)?;
        }
        write!(f, " ({} workers, {}ms)", self.workers, self.elapsed_ms)
    }
}
