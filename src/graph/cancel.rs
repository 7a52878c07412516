//! Cancellation for long-running path searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Shared abort signal with an optional deadline.
///
/// Clones share the flag: calling [`cancel`](Self::cancel) on any clone stops
/// every search polling it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    started: Instant,
    deadline: Option<Instant>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// A token that only fires on explicit cancellation.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            deadline: None,
        }
    }

    /// A token that also fires once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        let started = Instant::now();
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            started,
            deadline: started.checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` or `Err(Timeout)` once the token has fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            let now = Instant::now();
            if now >= deadline {
                return Err(Error::Timeout {
                    elapsed_ms: u64::try_from(now.duration_since(self.started).as_millis()).unwrap_or(u64::MAX),
                });
            }
        }
        Ok(())
    }
}
