// src/checker/aggregate.rs
// =============================================================================
// Collects ProbeResults as workers finish them.
//
// Workers run on different threads and finish in whatever order the network
// decides, so insertion has to be safe from many threads at once. A Mutex
// around a Vec is all we need: each insert holds the lock for one push.
//
// There is no deduplication. The same URL submitted twice gives two results.
// =============================================================================

use std::sync::{Mutex, MutexGuard};

use super::probe::ProbeResult;

/// Unordered, thread-safe bag of probe results.
#[derive(Debug, Default)]
pub struct Aggregator {
    results: Mutex<Vec<ProbeResult>>,
}

impl Aggregator {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the storage for an expected number of results
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Adds one result. Safe to call concurrently from any thread.
    pub fn insert(&self, result: ProbeResult) {
        self.lock().push(result);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Hands back everything collected so far, in insertion order
    pub fn into_results(self) -> Vec<ProbeResult> {
        self.results
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Empties the aggregator through a shared reference
    pub fn take_all(&self) -> Vec<ProbeResult> {
        std::mem::take(&mut *self.lock())
    }

    // A worker that panicked mid-push can't leave the Vec half-written,
    // so a poisoned lock still guards valid data and we keep using it.
    fn lock(&self) -> MutexGuard<'_, Vec<ProbeResult>> {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
