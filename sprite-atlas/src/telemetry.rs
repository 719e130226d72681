//! Phase-timing telemetry (§4.8 point 7, §6 `slow_op_threshold_ms`).
//!
//! Every orchestrator phase is timed; phases at or above the configured
//! threshold log at `warn`, everything else at `trace`, mirroring how the
//! texture manager reports VRAM pressure only when it actually matters.

use std::time::Instant;

use tracing::{trace, warn};

pub struct PhaseTimer {
    name: &'static str,
    start: Instant,
}

impl PhaseTimer {
    pub fn start(name: &'static str) -> Self {
        Self { name, start: Instant::now() }
    }

    /// Consumes the timer, logs at the appropriate level, and returns
    /// `(name, elapsed_ms)` for inclusion in a [`crate::orchestrator::BakeReport`].
    pub fn finish(self, threshold_ms: u64) -> (&'static str, u64) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        if elapsed_ms >= threshold_ms {
            warn!(phase = self.name, elapsed_ms, "slow pipeline phase");
        } else {
            trace!(phase = self.name, elapsed_ms, "pipeline phase");
        }
        (self.name, elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reports_elapsed_time_and_name() {
        let timer = PhaseTimer::start("decode");
        let (name, elapsed_ms) = timer.finish(50_000);
        assert_eq!(name, "decode");
        assert!(elapsed_ms < 50_000);
    }
}
