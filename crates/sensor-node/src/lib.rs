//! Sensor Node
//!
//! Periodically samples the PIR, humidity/heat and LDR sensors into a shared
//! ring buffer, summarizes each batch and transmits the summary over the
//! serial link.

mod config;
mod consumer;
mod error;
mod node;
mod producer;
mod source;

pub use config::{
    BufferConfig, HandshakeConfig, LockScope, LoggingConfig, NodeConfig, SamplingConfig,
    SensorsConfig, SerialConfig, SourceKind,
};
pub use consumer::Consumer;
pub use error::NodeError;
pub use node::{NodeState, SensorNode};
pub use producer::Producer;
pub use source::build_source;

use tracing_subscriber::EnvFilter;

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), NodeError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| NodeError::Logging(e.to_string()))
}
