//! Producer/Consumer Handshake
//!
//! Two binary signals coordinate exactly one producer and one consumer
//! around the shared reading buffer:
//! - `producer_ready`: the consumer has copied the buffer out; sample the next batch
//! - `consumer_ready`: a batch is in the buffer; copy it out

mod signal;

pub use signal::{HandshakeError, Signal};

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The pair of signals shared by the producer and consumer tasks
#[derive(Debug, Clone)]
pub struct Handshake {
    producer_ready: Arc<Signal>,
    consumer_ready: Arc<Signal>,
    /// Upper bound on each wait; `None` waits forever
    wait_timeout: Option<Duration>,
}

impl Handshake {
    /// Create a handshake with unbounded waits.
    ///
    /// `producer_ready` starts signaled so the first batch can run without
    /// an external kick.
    pub fn new() -> Self {
        Self {
            producer_ready: Arc::new(Signal::signaled()),
            consumer_ready: Arc::new(Signal::new()),
            wait_timeout: None,
        }
    }

    /// Bound every wait by the given duration
    pub fn with_wait_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Producer side: block until the consumer releases the buffer
    pub async fn wait_producer_ready(&self) -> Result<(), HandshakeError> {
        debug!("Producer waiting for slot");
        self.producer_ready.wait_for(self.wait_timeout).await
    }

    /// Producer side: announce a finished batch
    pub fn signal_consumer_ready(&self) {
        debug!("Producer signaling consumer");
        self.consumer_ready.signal();
    }

    /// Consumer side: block until a batch is available
    pub async fn wait_consumer_ready(&self) -> Result<(), HandshakeError> {
        debug!("Consumer waiting for data");
        self.consumer_ready.wait_for(self.wait_timeout).await
    }

    /// Consumer side: hand the buffer back to the producer
    pub fn signal_producer_ready(&self) {
        debug!("Consumer signaling producer");
        self.producer_ready.signal();
    }

    /// Access the producer-ready signal
    pub fn producer_ready(&self) -> &Signal {
        &self.producer_ready
    }

    /// Access the consumer-ready signal
    pub fn consumer_ready(&self) -> &Signal {
        &self.consumer_ready
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_producer_starts_ready() {
        let handshake = Handshake::new();
        assert!(handshake.producer_ready().is_signaled());
        assert!(!handshake.consumer_ready().is_signaled());

        handshake.wait_producer_ready().await.unwrap();
        assert!(!handshake.producer_ready().is_signaled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_strict_alternation() {
        let handshake = Handshake::new().with_wait_timeout(Some(Duration::from_millis(50)));
        let consumer = handshake.clone();

        handshake.wait_producer_ready().await.unwrap();
        // Consumer cannot proceed before the batch is announced
        assert!(consumer.wait_consumer_ready().await.is_err());

        handshake.signal_consumer_ready();
        consumer.wait_consumer_ready().await.unwrap();

        // Producer cannot start the next batch before the copy-out
        assert!(handshake.wait_producer_ready().await.is_err());
        consumer.signal_producer_ready();
        handshake.wait_producer_ready().await.unwrap();
    }
}
