// src/config.rs
// =============================================================================
// Tunables for a probing batch.
//
// There are only two knobs:
// - pool_size: how many probes may be in flight at the same time
// - timeout:   how long a single probe may take before it counts as failed
//
// Both have defaults (10 workers, 5 seconds) so callers that don't care can
// just use ProbeConfig::default().
// =============================================================================

use std::time::Duration;

use crate::checker::DispatchError;

/// Default number of concurrent probes
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Default per-probe timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Settings applied to one `probe_all` batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    /// Maximum number of probes running at once (must be > 0)
    pub pool_size: usize,
    /// Timeout applied to every probe individually (must be > 0)
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProbeConfig {
    /// Builds a validated config from a pool size and a timeout in seconds.
    ///
    /// Negative, zero, NaN or infinite timeouts are rejected, as is a pool
    /// size of zero.
    pub fn new(pool_size: usize, timeout_secs: f64) -> Result<Self, DispatchError> {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(DispatchError::InvalidTimeout(timeout_secs));
        }
        // try_from_secs_f64 still fails for values too large for a Duration
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|_| DispatchError::InvalidTimeout(timeout_secs))?;

        let config = Self { pool_size, timeout };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the worker pool relies on.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.pool_size == 0 {
            return Err(DispatchError::InvalidPoolSize(self.pool_size));
        }
        if self.timeout.is_zero() {
            return Err(DispatchError::InvalidTimeout(self.timeout.as_secs_f64()));
        }
        Ok(())
    }
}
