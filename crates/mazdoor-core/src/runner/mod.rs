//! Bounded task runner: a fixed worker pool over a shared FIFO queue.
//!
//! Hand over a closed batch of items and get exactly one outcome per item
//! back, with every worker joined before control returns. Per-item failures
//! stay in their slot and never abort sibling workers.

mod cancel;
mod queue;
mod report;
mod run;
mod worker;

pub use cancel::CancelToken;
pub use queue::TaskOutcome;
pub use report::RunReport;
pub use run::{run, RunnerBuilder};
pub use worker::WorkerConfig;
