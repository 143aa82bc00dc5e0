//! Run entry points: validate, submit, join, collect.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crossbeam::channel::unbounded;

use crate::error::RunnerError;
use crate::runner::cancel::CancelToken;
use crate::runner::queue::{IndexedItem, TaskOutcome, WorkerPool};
use crate::runner::worker::WorkerConfig;

/// Configurable path into the runner. The free [`run`] function covers the
/// plain case.
pub struct RunnerBuilder {
    worker_count: usize,
    config: WorkerConfig,
    cancel: CancelToken,
    progress: Option<Arc<AtomicUsize>>,
}

impl RunnerBuilder {
    pub fn new() -> Self {
        Self {
            worker_count: num_cpus::get().max(1),
            config: WorkerConfig::default(),
            cancel: CancelToken::new(),
            progress: None,
        }
    }

    /// Set the number of workers. Validated at run time; 0 fails pre-flight.
    pub fn workers(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Prefix for worker thread names
    pub fn thread_name(mut self, prefix: &str) -> Self {
        self.config.thread_name = prefix.to_string();
        self
    }

    /// Stack size per worker thread
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = bytes;
        self
    }

    /// Token that stops workers from picking up new items once signalled
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Counter bumped once per completed slot; observe it from another
    /// thread for progress reporting.
    pub fn progress(mut self, counter: Arc<AtomicUsize>) -> Self {
        self.progress = Some(counter);
        self
    }

    /// Distribute `items` across the workers and collect one outcome per
    /// item. Does not return until every worker has been joined.
    pub fn run<T, R, F>(self, items: Vec<T>, transform: F) -> Result<Vec<TaskOutcome<R>>, RunnerError>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Result<R, String> + Send + Sync + 'static,
    {
        if self.worker_count == 0 {
            return Err(RunnerError::InvalidWorkerCount { requested: 0 });
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let (item_tx, item_rx) = unbounded();
        let progress = self.progress.unwrap_or_default();

        let pool = WorkerPool::spawn(
            self.worker_count,
            &self.config,
            item_rx,
            self.cancel,
            progress,
            Arc::new(transform),
        )?;

        // Submission closes here: dropping the sender disconnects the queue,
        // which is how workers learn there is nothing left to pull.
        for (index, item) in items.into_iter().enumerate() {
            let _ = item_tx.send(IndexedItem { index, item });
        }
        drop(item_tx);

        pool.join()
    }
}

impl Default for RunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `transform` over `items` on `worker_count` workers pulling from a
/// shared queue. Returns exactly one outcome per item, in arbitrary order,
/// after all workers have finished.
pub fn run<T, R, F>(
    items: Vec<T>,
    worker_count: usize,
    transform: F,
) -> Result<Vec<TaskOutcome<R>>, RunnerError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Result<R, String> + Send + Sync + 'static,
{
    RunnerBuilder::new().workers(worker_count).run(items, transform)
}
