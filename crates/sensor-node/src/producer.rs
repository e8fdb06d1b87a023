//! Sampling task
//!
//! `WaitForSlot -> SampleBatch -> SignalConsumer -> WaitForSlot`, forever.

use crate::config::{LockScope, SamplingConfig};
use crate::NodeError;
use handshake::Handshake;
use ring_buffer::{SensorReading, SharedBuffer};
use sensor_io::{SampleSource, SensorError};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn};

/// Take one reading from a blocking source.
///
/// On the multi-thread runtime the read runs under `block_in_place`, so a
/// slow bus does not stall the other tasks on this worker. The current-thread
/// runtime cannot hand its worker off and reads inline.
fn sample_blocking<S: SampleSource>(source: &mut S) -> Result<SensorReading, SensorError> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| source.sample_all())
        }
        _ => source.sample_all(),
    }
}

/// Fills the shared buffer one batch at a time
pub struct Producer<S> {
    source: S,
    buffer: SharedBuffer,
    handshake: Handshake,
    config: SamplingConfig,
    batches: u64,
}

impl<S: SampleSource> Producer<S> {
    /// Create a producer
    pub fn new(source: S, buffer: SharedBuffer, handshake: Handshake, config: SamplingConfig) -> Self {
        Self {
            source,
            buffer,
            handshake,
            config,
            batches: 0,
        }
    }

    /// Run batches until a sensor fails
    pub async fn run(mut self) -> Result<(), NodeError> {
        info!(
            "Starting producer: {} samples per batch every {}ms ({:?} lock)",
            self.config.batch_size, self.config.interval_ms, self.config.lock_scope
        );

        loop {
            match self.run_batch().await {
                Err(NodeError::Handshake(e)) => warn!("Producer stalled: {}", e),
                other => other?,
            }
        }
    }

    /// Wait for the buffer, sample one batch, then hand it to the consumer
    pub async fn run_batch(&mut self) -> Result<(), NodeError> {
        self.handshake.wait_producer_ready().await?;

        let interval = self.config.interval();
        let mut evicted = 0usize;

        match self.config.lock_scope {
            LockScope::Batch => {
                let mut buffer = self.buffer.lock().await;
                for _ in 0..self.config.batch_size {
                    tokio::time::sleep(interval).await;
                    let reading = sample_blocking(&mut self.source)?;
                    evicted += buffer.push_evicting(reading).is_some() as usize;
                }
            }
            LockScope::Sample => {
                for _ in 0..self.config.batch_size {
                    tokio::time::sleep(interval).await;
                    let reading = sample_blocking(&mut self.source)?;
                    evicted += self.buffer.push_evicting(reading).await.is_some() as usize;
                }
            }
        }

        self.batches += 1;
        debug!(
            "Batch {} complete: {} samples, {} evicted",
            self.batches, self.config.batch_size, evicted
        );

        self.handshake.signal_consumer_ready();
        Ok(())
    }

    /// Completed batches
    pub fn batches(&self) -> u64 {
        self.batches
    }
}
