//! Link Error Types

use thiserror::Error;

/// Errors that can occur while transmitting a summary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Sink did not accept the frame in time
    #[error("Timeout writing frame after {0}ms")]
    Timeout(u64),

    /// Write failed
    #[error("Serial write error: {0}")]
    Io(String),

    /// Sink went away
    #[error("Serial sink closed")]
    Closed,

    /// Port could not be opened
    #[error("Serial port error: {0}")]
    Serial(String),

    /// Retries exhausted; the sink is treated as unavailable
    #[error("Serial sink unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },

    /// Frame of the wrong size
    #[error("Invalid frame length: expected {expected}, got {actual}")]
    FrameLength { expected: usize, actual: usize },
}

impl LinkError {
    /// Whether the caller may retry the same frame
    pub fn is_retryable(&self) -> bool {
        matches!(self, LinkError::Timeout(_))
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::BrokenPipe | ErrorKind::WriteZero | ErrorKind::NotConnected => {
                LinkError::Closed
            }
            _ => LinkError::Io(err.to_string()),
        }
    }
}
