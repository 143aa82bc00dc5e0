//! Fixed worker pool pulling from a shared first-come-first-served queue.
//!
//! One crossbeam channel carries items in, a second carries outcomes out.
//! The channel is the only hand-off point: an item reaches exactly one
//! worker, and a worker that finds the queue disconnected exits its loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::error::{RunnerError, TaskError};
use crate::runner::cancel::CancelToken;
use crate::runner::worker::WorkerConfig;

/// One unit of work plus its submission index
pub(crate) struct IndexedItem<T> {
    pub index: usize,
    pub item: T,
}

/// Outcome for one submitted item. `index` ties the slot back to submission
/// order; the collection itself is unordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome<R> {
    pub index: usize,
    pub result: Result<R, TaskError>,
}

/// Worker threads plus the receiving half of the outcome channel
pub(crate) struct WorkerPool<R> {
    handles: Vec<JoinHandle<()>>,
    outcome_rx: Receiver<TaskOutcome<R>>,
}

impl<R> WorkerPool<R>
where
    R: Send + 'static,
{
    /// Spawn `worker_count` threads, each looping on the item channel.
    pub fn spawn<T, F>(
        worker_count: usize,
        config: &WorkerConfig,
        item_rx: Receiver<IndexedItem<T>>,
        cancel: CancelToken,
        progress: Arc<AtomicUsize>,
        transform: Arc<F>,
    ) -> Result<Self, RunnerError>
    where
        T: Send + 'static,
        F: Fn(T) -> Result<R, String> + Send + Sync + 'static,
    {
        let (outcome_tx, outcome_rx) = unbounded();
        let mut handles = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let item_rx = item_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let cancel = cancel.clone();
            let progress = Arc::clone(&progress);
            let transform = Arc::clone(&transform);

            let handle = config
                .thread_builder(worker_id)
                .spawn(move || {
                    worker_loop(item_rx, outcome_tx, cancel, progress, transform);
                })
                .map_err(|e| RunnerError::Spawn {
                    worker: worker_id,
                    source: e.to_string(),
                })?;

            handles.push(handle);
        }

        // Workers hold the only remaining senders; the channel disconnects
        // once the last worker exits.
        drop(outcome_tx);

        Ok(Self { handles, outcome_rx })
    }

    /// Join every worker, then drain the outcome channel.
    /// Does not return until all workers have finished.
    pub fn join(self) -> Result<Vec<TaskOutcome<R>>, RunnerError> {
        let Self { handles, outcome_rx } = self;

        for (worker, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| RunnerError::WorkerPanicked { worker })?;
        }

        Ok(outcome_rx.iter().collect())
    }
}

/// Worker main loop: pull until the queue disconnects, publish one outcome
/// per pulled item. A transform panic is contained in that item's slot.
fn worker_loop<T, R, F>(
    items: Receiver<IndexedItem<T>>,
    outcomes: Sender<TaskOutcome<R>>,
    cancel: CancelToken,
    progress: Arc<AtomicUsize>,
    transform: Arc<F>,
) where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Result<R, String> + Send + Sync + 'static,
{
    while let Ok(next) = items.recv() {
        let index = next.index;

        // Cancelled runs still fill every slot: drain without transforming.
        let result = if cancel.is_cancelled() {
            Err(TaskError::Cancelled)
        } else {
            match panic::catch_unwind(AssertUnwindSafe(|| (transform)(next.item))) {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(msg)) => Err(TaskError::Failed(msg)),
                Err(payload) => Err(TaskError::Panicked(panic_message(payload))),
            }
        };

        let _ = outcomes.send(TaskOutcome { index, result });
        progress.fetch_add(1, Ordering::Relaxed);
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
