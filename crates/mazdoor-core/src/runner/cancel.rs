//! Cooperative cancellation for a run in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable token shared between the caller and the workers.
///
/// Once signalled, workers stop picking up new items; the item a worker is
/// already transforming runs to completion. Items never picked up still get
/// an outcome slot, marked cancelled, so a cancelled run is complete rather
/// than ambiguous.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());

        // Idempotent
        token.cancel();
        assert!(token.is_cancelled());
    }
}
