//! Request counter behind `POST /count`

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared monotonic counter
///
/// Implementations must be linearizable: concurrent callers of
/// [`increment`](Counter::increment) each observe a distinct value.
pub trait Counter: Send + Sync {
    /// Add one and return the new value
    fn increment(&self) -> u64;

    fn current(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Counter for AtomicCounter {
    fn increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }
}
