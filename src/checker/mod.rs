// src/checker/mod.rs
// =============================================================================
// This module contains all URL probing logic.
//
// Submodules:
// - probe: Checks one URL with a HEAD request and classifies the outcome
// - aggregate: Thread-safe collection of finished results
// - dispatch: Bounded worker pool that runs probes for a whole batch
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod aggregate;
mod dispatch;
mod probe;

// Re-export public items from submodules
// This lets users write `checker::probe_all()` instead of
// `checker::dispatch::probe_all()`
pub use dispatch::{probe_all, DispatchError};
pub use probe::{ProbeResult, USER_AGENT};

// Only tests build results by hand
#[cfg(test)]
pub use probe::ProbeOutcome;

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why are aggregate, dispatch and probe private?
//    - The rest of the app only needs probe_all() and the result types
//    - Keeping the submodules private lets us reshuffle them freely
// -----------------------------------------------------------------------------
