//! Core library for mazdoor: worker pool over a shared queue, per-item
//! outcomes, lock-protected counter. Used by the CLI binary; can be reused
//! by other tools.

pub mod config;
pub mod counter;
pub mod error;
pub mod runner;
pub mod utils;

// Re-export main API for CLI
pub use config::{effective_quiet, effective_workers, load_config, Config};
pub use counter::SharedCounter;
pub use error::{RunnerError, TaskError};
pub use runner::{run, CancelToken, RunReport, RunnerBuilder, TaskOutcome, WorkerConfig};
pub use utils::{log, log_error};
