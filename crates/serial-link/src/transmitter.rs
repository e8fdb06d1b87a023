//! Bounded Summary Transmitter

use crate::frame::encode;
use crate::LinkError;
use serde::{Deserialize, Serialize};
use stats_engine::SummaryRecord;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Default timeout for one frame write
const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Transmission limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Per-attempt write timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after the first timed-out attempt
    pub max_retries: u32,
    /// Retry backoff base in milliseconds (multiplied by the attempt number)
    pub retry_backoff_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: 3,
            retry_backoff_ms: 100,
        }
    }
}

/// Writes summary frames to a byte sink
pub struct Transmitter<W> {
    writer: W,
    config: LinkConfig,
    frames_sent: u64,
}

impl<W: AsyncWrite + Unpin> Transmitter<W> {
    /// Create a transmitter over the given sink
    pub fn new(writer: W, config: LinkConfig) -> Self {
        info!(
            "Creating transmitter: timeout={}ms, max_retries={}",
            config.timeout_ms, config.max_retries
        );
        Self {
            writer,
            config,
            frames_sent: 0,
        }
    }

    /// Write raw bytes once, bounded by the configured timeout
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        let mut written = 0;
        self.write_from(bytes, &mut written).await
    }

    /// Write `bytes[*written..]`, advancing `written` as the sink accepts data.
    ///
    /// On timeout `written` holds how far the attempt got, so a retry can
    /// resume without putting duplicate bytes on the wire.
    async fn write_from(&mut self, bytes: &[u8], written: &mut usize) -> Result<(), LinkError> {
        let timeout = Duration::from_millis(self.config.timeout_ms);
        let writer = &mut self.writer;
        let write = async {
            while *written < bytes.len() {
                let n = writer.write(&bytes[*written..]).await?;
                if n == 0 {
                    return Err(std::io::Error::from(std::io::ErrorKind::WriteZero));
                }
                *written += n;
            }
            writer.flush().await
        };

        match tokio::time::timeout(timeout, write).await {
            Ok(result) => result.map_err(LinkError::from),
            Err(_) => Err(LinkError::Timeout(self.config.timeout_ms)),
        }
    }

    /// Encode and send a summary, retrying timeouts with linear backoff.
    ///
    /// A retry continues from the first byte the sink has not accepted, so
    /// the frame reaches the wire exactly once. Non-retryable failures
    /// return immediately. Running out of retries yields
    /// [`LinkError::Unavailable`].
    pub async fn send(&mut self, record: &SummaryRecord) -> Result<(), LinkError> {
        let frame = encode(record);
        let mut written = 0usize;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.write_from(&frame, &mut written).await {
                Ok(()) => {
                    self.frames_sent += 1;
                    debug!("Sent summary frame #{} ({} bytes)", self.frames_sent, frame.len());
                    return Ok(());
                }
                Err(e) if e.is_retryable() => {
                    if attempt > self.config.max_retries {
                        return Err(LinkError::Unavailable { attempts: attempt });
                    }
                    warn!(
                        "Frame send failed (attempt {}, {}/{} bytes written): {}",
                        attempt,
                        written,
                        frame.len(),
                        e
                    );
                    let backoff = self.config.retry_backoff_ms * attempt as u64;
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Number of frames successfully sent
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Get the transmission limits
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Give the sink back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, FRAME_LEN};
    use tokio::io::AsyncReadExt;

    fn record() -> SummaryRecord {
        SummaryRecord::from_values([1.0; 12])
    }

    #[tokio::test]
    async fn test_send_writes_one_frame() {
        let mut tx = Transmitter::new(Vec::new(), LinkConfig::default());
        tx.send(&record()).await.unwrap();
        tx.send(&record()).await.unwrap();
        assert_eq!(tx.frames_sent(), 2);

        let bytes = tx.into_inner();
        assert_eq!(bytes.len(), 2 * FRAME_LEN);
        assert_eq!(decode(&bytes[..FRAME_LEN]).unwrap(), record());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_sink_times_out_then_unavailable() {
        // Nobody reads the other end, so the write stalls once 8 bytes are buffered
        let (sink, _reader) = tokio::io::duplex(8);
        let config = LinkConfig {
            timeout_ms: 50,
            max_retries: 2,
            retry_backoff_ms: 10,
        };
        let mut tx = Transmitter::new(sink, config);

        assert_eq!(
            tx.send_bytes(&[0u8; FRAME_LEN]).await,
            Err(LinkError::Timeout(50))
        );
        assert_eq!(
            tx.send(&record()).await,
            Err(LinkError::Unavailable { attempts: 3 })
        );
        assert_eq!(tx.frames_sent(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_resumes_partial_frame() {
        // The first attempt stalls after 40 bytes; the reader drains before the retry
        let (sink, mut reader) = tokio::io::duplex(40);
        let config = LinkConfig {
            timeout_ms: 50,
            max_retries: 1,
            retry_backoff_ms: 10,
        };
        let drain = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(55)).await;
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await.map(|_| bytes)
        });

        let mut tx = Transmitter::new(sink, config);
        tx.send(&record()).await.unwrap();
        assert_eq!(tx.frames_sent(), 1);
        drop(tx);

        let bytes = drain.await.unwrap().unwrap();
        assert_eq!(bytes.len(), FRAME_LEN);
        assert_eq!(decode(&bytes).unwrap(), record());
    }

    #[tokio::test]
    async fn test_closed_sink_is_not_retried() {
        let (sink, reader) = tokio::io::duplex(64);
        drop(reader);

        let mut tx = Transmitter::new(sink, LinkConfig::default());
        let err = tx.send(&record()).await.unwrap_err();
        assert_eq!(err, LinkError::Closed);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_only_timeouts_are_retryable() {
        assert!(LinkError::Timeout(10).is_retryable());
        assert!(!LinkError::Io("boom".into()).is_retryable());
        assert!(!LinkError::Unavailable { attempts: 4 }.is_retryable());
    }
}
