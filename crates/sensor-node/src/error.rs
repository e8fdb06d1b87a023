//! Node Error Types

use handshake::HandshakeError;
use ring_buffer::BufferError;
use sensor_io::SensorError;
use serial_link::LinkError;
use stats_engine::StatsError;
use thiserror::Error;

/// Errors surfaced by the node and its tasks
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured sample source could not be opened
    #[error("Sample source unavailable: {0}")]
    SourceInit(String),

    /// A global log subscriber was already installed
    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Handshake(#[from] HandshakeError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Link(#[from] LinkError),

    /// A task panicked or was cancelled
    #[error("Task {0} failed: {1}")]
    Task(&'static str, String),
}
