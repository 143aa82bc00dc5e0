//! Error types for runs and for individual items.
//! A per-item failure stays in that item's outcome slot; only pre-flight
//! validation or a dead worker aborts a whole run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors that abort a run as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerError {
    /// A pool needs at least one worker
    InvalidWorkerCount { requested: usize },
    /// The OS refused to spawn a worker thread
    Spawn { worker: usize, source: String },
    /// A worker thread died outside of item processing (join failed)
    WorkerPanicked { worker: usize },
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::InvalidWorkerCount { requested } => {
                write!(f, "worker count must be at least 1 (got {})", requested)
            }
            RunnerError::Spawn { worker, source } => {
                write!(f, "failed to spawn worker {}: {}", worker, source)
            }
            RunnerError::WorkerPanicked { worker } => {
                write!(f, "worker {} panicked outside of item processing", worker)
            }
        }
    }
}

impl std::error::Error for RunnerError {}

/// Failure attached to a single item's outcome slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskError {
    /// The transform returned an error for this item
    Failed(String),
    /// The transform panicked on this item; the panic was contained
    Panicked(String),
    /// The run was cancelled before this item was picked up
    Cancelled,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Failed(msg) => write!(f, "task failed: {}", msg),
            TaskError::Panicked(msg) => write!(f, "task panicked: {}", msg),
            TaskError::Cancelled => write!(f, "task cancelled"),
        }
    }
}

impl std::error::Error for TaskError {}
