//! Convergence driver: re-applies the deduplicator to its own output until a
//! pass changes nothing or the iteration cap is reached.

use std::time::Duration;

use dr_core::config::DEFAULT_MAX_ITERATIONS;
use dr_core::Result;
use tracing::{debug, warn};

use crate::dedup::deduplicate;
use crate::field::TextField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizeReport {
    pub final_text: String,
    /// Some pass changed the text.
    pub changed: bool,
    /// Passes executed, including the one that observed the fixed point.
    pub iterations: usize,
    /// The cap was reached before a fixed point was observed.
    pub hit_limit: bool,
}

impl StabilizeReport {
    pub fn converged(&self) -> bool {
        !self.hit_limit
    }
}

/// Pure variant: no field, no delay.
pub fn stabilize(initial: &str, max_iterations: usize) -> StabilizeReport {
    let mut current = initial.to_string();
    let mut changed = false;

    for iteration in 1..=max_iterations {
        let next = deduplicate(&current);
        if next == current {
            return StabilizeReport { final_text: current, changed, iterations: iteration, hit_limit: false };
        }
        debug!(iteration, from = %current, to = %next, "dedup pass changed text");
        current = next;
        changed = true;
    }

    StabilizeReport { final_text: current, changed, iterations: max_iterations, hit_limit: true }
}

/// Drives deduplication against a live field, pausing between passes so the
/// host can settle.
#[derive(Debug, Clone)]
pub struct Stabilizer {
    pub max_iterations: usize,
    pub delay: Duration,
}

impl Stabilizer {
    pub fn new(max_iterations: usize, delay: Duration) -> Self {
        Self { max_iterations, delay }
    }

    /// No waiting between passes.
    pub fn immediate(max_iterations: usize) -> Self {
        Self::new(max_iterations, Duration::ZERO)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn run(&self, field: &dyn TextField) -> Result<StabilizeReport> {
        let mut changed = false;
        let mut last_written: Option<String> = None;

        for iteration in 1..=self.max_iterations {
            let current = field.read().await?;
            let next = deduplicate(&current);
            if next == current {
                return Ok(StabilizeReport {
                    final_text: current,
                    changed,
                    iterations: iteration,
                    hit_limit: false,
                });
            }

            debug!(iteration, from = %current, to = %next, "writing dedup pass");
            field.write(&next).await?;
            changed = true;
            last_written = Some(next);

            if iteration < self.max_iterations && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let final_text = match last_written {
            Some(text) => text,
            None => field.read().await?,
        };
        warn!(max_iterations = self.max_iterations, "dedup did not converge within cap");
        Ok(StabilizeReport {
            final_text,
            changed,
            iterations: self.max_iterations,
            hit_limit: true,
        })
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, Duration::from_millis(dr_core::config::DEFAULT_DELAY_MS))
    }
}
