//! Binary Signal
//!
//! A one-slot signaling channel with binary-semaphore semantics: at most one
//! wake-up is ever pending, so several `signal` calls before a `wait`
//! collapse into a single wake-up. This differs from an unbounded queue,
//! where every signal would be delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Notify;

/// Errors from bounded waits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    /// No signal arrived in time
    #[error("Timed out waiting for signal after {0}ms")]
    Timeout(u64),
}

/// One-slot coalescing signal
#[derive(Debug, Default)]
pub struct Signal {
    /// Whether a wake-up is pending
    pending: AtomicBool,
    notify: Notify,
}

impl Signal {
    /// Create a clear signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signal with one wake-up already pending
    pub fn signaled() -> Self {
        Self {
            pending: AtomicBool::new(true),
            notify: Notify::new(),
        }
    }

    /// Set the pending flag and wake a waiter if there is one.
    ///
    /// Signaling an already-signaled channel is a no-op.
    pub fn signal(&self) {
        self.pending.store(true, Ordering::Release);
        self.notify.notify_one();
    }

    /// Consume the pending wake-up without blocking
    pub fn try_take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Check whether a wake-up is pending
    pub fn is_signaled(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Block until signaled, consuming the pending wake-up
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent signal is not lost
            notified.as_mut().enable();

            if self.try_take() {
                return;
            }
            notified.await;
        }
    }

    /// Block until signaled or the timeout elapses
    pub async fn wait_timeout(&self, timeout: Duration) -> Result<(), HandshakeError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| HandshakeError::Timeout(timeout.as_millis() as u64))
    }

    /// Wait with an optional bound; `None` waits forever
    pub async fn wait_for(&self, timeout: Option<Duration>) -> Result<(), HandshakeError> {
        match timeout {
            Some(timeout) => self.wait_timeout(timeout).await,
            None => {
                self.wait().await;
                Ok(())
            }
        }
    }
}
