//! Per-cycle latency watchdog.
//!
//! Observability only: a breach logs a warning but never alters
//! classification, drops frames, or throttles the loop. Every cycle is
//! measured, including cycles with zero detections — the empty fast path is
//! itself latency-relevant.

use std::time::{Duration, Instant};

pub struct CycleWatchdog {
    limit: Duration,
}

/// Handle for one in-flight cycle measurement.
pub struct CycleTimer {
    started: Instant,
}

impl CycleWatchdog {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// Starts timing a cycle. Call at frame acquisition.
    pub fn begin(&self) -> CycleTimer {
        CycleTimer {
            started: Instant::now(),
        }
    }

    /// Finishes a cycle measurement, logging a warning on breach.
    /// Returns the measured duration.
    pub fn observe(&self, timer: CycleTimer, events_emitted: usize) -> Duration {
        let elapsed = timer.started.elapsed();
        if self.breached(elapsed) {
            log::warn!(
                "cycle latency {:.3}s exceeded limit {:.3}s ({} events)",
                elapsed.as_secs_f32(),
                self.limit.as_secs_f32(),
                events_emitted
            );
        }
        elapsed
    }

    /// Breach predicate, split out so tests can feed synthetic durations.
    pub fn breached(&self, elapsed: Duration) -> bool {
        elapsed > self.limit
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
