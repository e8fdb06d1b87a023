//! Statistics task
//!
//! `WaitForData -> CopyOut -> SignalProducer -> Compute -> Transmit -> WaitForData`.
//! The producer is released right after the copy-out, so the next batch
//! samples while this cycle computes and transmits.

use crate::NodeError;
use handshake::Handshake;
use ring_buffer::{SharedBuffer, SnapshotPolicy};
use serial_link::Transmitter;
use stats_engine::SummaryRecord;
use tokio::io::AsyncWrite;
use tracing::{debug, info, warn};

/// Summarizes each batch and transmits the result
pub struct Consumer<W> {
    buffer: SharedBuffer,
    handshake: Handshake,
    transmitter: Transmitter<W>,
    snapshot: SnapshotPolicy,
    cycles: u64,
}

impl<W: AsyncWrite + Unpin> Consumer<W> {
    /// Create a consumer
    pub fn new(
        buffer: SharedBuffer,
        handshake: Handshake,
        transmitter: Transmitter<W>,
        snapshot: SnapshotPolicy,
    ) -> Self {
        Self {
            buffer,
            handshake,
            transmitter,
            snapshot,
            cycles: 0,
        }
    }

    /// Run summary cycles until the link fails
    pub async fn run(mut self) -> Result<(), NodeError> {
        info!("Starting consumer ({:?} snapshots)", self.snapshot);

        loop {
            match self.run_cycle().await {
                Err(NodeError::Handshake(e)) => warn!("Consumer stalled: {}", e),
                other => {
                    other?;
                }
            }
        }
    }

    /// One summary cycle; returns the transmitted record, if any
    pub async fn run_cycle(&mut self) -> Result<Option<SummaryRecord>, NodeError> {
        self.handshake.wait_consumer_ready().await?;

        let readings = self.buffer.snapshot(self.snapshot).await;
        self.handshake.signal_producer_ready();

        let record = match SummaryRecord::from_readings(&readings) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping summary cycle: {}", e);
                return Ok(None);
            }
        };

        self.transmitter.send(&record).await?;
        self.cycles += 1;
        debug!(
            "Cycle {} transmitted summary of {} readings",
            self.cycles,
            readings.len()
        );

        Ok(Some(record))
    }

    /// Completed summary cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
