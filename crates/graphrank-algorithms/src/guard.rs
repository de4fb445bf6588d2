//! Cooperative cancellation for long-running computations
//!
//! Guards are polled between iterations only, never in the middle of one.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Signal raised by a guard when the enclosing operation should stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminated {
    pub reason: String,
}

impl Terminated {
    pub fn new(reason: impl Into<String>) -> Self {
        Terminated {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Terminated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terminated: {}", self.reason)
    }
}

/// Checked by the engine before every iteration
pub trait TerminationGuard: Sync {
    fn check(&self) -> Result<(), Terminated>;
}

impl<F> TerminationGuard for F
where
    F: Fn() -> Result<(), Terminated> + Sync,
{
    fn check(&self) -> Result<(), Terminated> {
        self()
    }
}

/// Guard that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminate;

impl TerminationGuard for NeverTerminate {
    fn check(&self) -> Result<(), Terminated> {
        Ok(())
    }
}

/// Shared flag that any thread can raise with [`CancellationFlag::cancel`]
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl TerminationGuard for CancellationFlag {
    fn check(&self) -> Result<(), Terminated> {
        if self.is_cancelled() {
            Err(Terminated::new("cancelled by caller"))
        } else {
            Ok(())
        }
    }
}

/// Fires once the wall-clock budget measured from construction is spent
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Deadline {
            started: Instant::now(),
            budget,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }
}

impl TerminationGuard for Deadline {
    fn check(&self) -> Result<(), Terminated> {
        if self.started.elapsed() >= self.budget {
            Err(Terminated::new(format!(
                "time budget of {:?} exceeded",
                self.budget
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let handle = flag.clone();
        assert!(flag.check().is_ok());

        handle.cancel();
        assert!(flag.is_cancelled());
        assert_eq!(flag.check(), Err(Terminated::new("cancelled by caller")));
    }

    #[test]
    fn test_deadline() {
        let generous = Deadline::after(Duration::from_secs(3600));
        assert!(generous.check().is_ok());
        assert!(generous.remaining() > Duration::from_secs(3500));

        let expired = Deadline::after(Duration::ZERO);
        assert!(expired.check().is_err());
        assert_eq!(expired.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_closure_guard() {
        let guard = || -> Result<(), Terminated> { Err(Terminated::new("stop")) };
        assert_eq!(guard.check().unwrap_err().to_string(), "terminated: stop");
        assert!(NeverTerminate.check().is_ok());
    }
}
