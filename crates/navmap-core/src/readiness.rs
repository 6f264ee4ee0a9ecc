//! Bounded wait for the widget's entry points to appear.

use crate::error::{BridgeError, BridgeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The widget is ready; `polls` earlier checks came back negative.
    Ready { polls: u32 },
    /// Not ready yet; sleep one interval and check again.
    Retry,
}

/// Counts readiness checks and gives up after a fixed number of them.
#[derive(Debug)]
pub struct ReadinessWait {
    attempts: u32,
    failed: u32,
}

impl ReadinessWait {
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            failed: 0,
        }
    }

    /// Record one check. Running out of attempts is a binding error.
    pub fn check(&mut self, ready: bool) -> BridgeResult<Readiness> {
        if ready {
            return Ok(Readiness::Ready { polls: self.failed });
        }
        self.failed += 1;
        if self.failed >= self.attempts {
            return Err(BridgeError::missing(format!(
                "widget render entry points after {} checks",
                self.failed
            )));
        }
        Ok(Readiness::Retry)
    }
}
