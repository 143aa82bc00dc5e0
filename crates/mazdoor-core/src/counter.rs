//! Lock-protected shared counter.
//!
//! Created once per run and cloned into each worker as an explicit handle,
//! never captured from an enclosing scope. Read the final value only after
//! every worker has been joined.

use std::sync::{Arc, Mutex};

/// Cloneable handle to a mutex-guarded count. N concurrent `increment`
/// calls leave the value at exactly N; no update is lost or doubled.
#[derive(Clone, Debug, Default)]
pub struct SharedCounter {
    inner: Arc<Mutex<u64>>,
}

impl SharedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, add one, release on guard drop (all exit paths).
    pub fn increment(&self) {
        self.add(1);
    }

    pub fn add(&self, n: u64) {
        // A poisoned lock still counts: recover the guard instead of
        // dropping the update.
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard += n;
    }

    pub fn get(&self) -> u64 {
        match self.inner.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
