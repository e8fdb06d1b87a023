//! Node configuration
//!
//! Loaded from an optional TOML file, then overridden from the environment
//! with the `SENSOR_NODE_` prefix and `__` between nested keys, e.g.
//! `SENSOR_NODE_SAMPLING__INTERVAL_MS=250`.

use crate::NodeError;
use config::{Config, Environment, File, FileFormat};
use ring_buffer::{SnapshotPolicy, DEFAULT_CAPACITY};
use sensor_io::{address, SensorAddresses};
use serde::{Deserialize, Serialize};
use serial_link::{LinkConfig, DEFAULT_BAUD_RATE};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Complete node configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub buffer: BufferConfig,
    pub sampling: SamplingConfig,
    pub sensors: SensorsConfig,
    pub link: SerialConfig,
    pub handshake: HandshakeConfig,
    pub logging: LoggingConfig,
}

/// Shared buffer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Physical slots; one less is usable
    pub capacity: usize,
    /// What the consumer copies out each cycle
    pub snapshot: SnapshotPolicy,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            snapshot: SnapshotPolicy::ValidRegion,
        }
    }
}

/// How long the producer holds the buffer lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    /// For the whole batch, sleeps and bus reads included
    #[default]
    Batch,
    /// Only around each individual push
    Sample,
}

/// Where samples come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Deterministic pseudo-random values, no hardware needed
    #[default]
    Simulated,
    /// Real sensors on a Linux I2C bus (`linux-i2c` feature)
    I2c,
}

/// Producer batch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Sample iterations per batch
    pub batch_size: usize,
    /// Delay before each iteration in milliseconds
    pub interval_ms: u64,
    pub lock_scope: LockScope,
    /// Sample source used by the binary
    pub source: SourceKind,
    /// Seed for the simulated source
    pub seed: u64,
}

impl SamplingConfig {
    /// Delay before each iteration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            batch_size: 30,
            interval_ms: 1000,
            lock_scope: LockScope::Batch,
            source: SourceKind::Simulated,
            seed: 0,
        }
    }
}

/// Sensor bus and device addresses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    /// I2C character device used by the `i2c` source
    pub bus: String,
    pub pir_address: u8,
    pub humidity_heat_address: u8,
    pub ldr_address: u8,
}

impl SensorsConfig {
    /// Device addresses in the form the sample sources take
    pub fn addresses(&self) -> SensorAddresses {
        SensorAddresses {
            pir: self.pir_address,
            humidity_heat: self.humidity_heat_address,
            ldr: self.ldr_address,
        }
    }
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            bus: "/dev/i2c-1".to_string(),
            pir_address: address::PIR,
            humidity_heat_address: address::HUMIDITY_HEAT,
            ldr_address: address::LDR,
        }
    }
}

/// Serial link to the BLE bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path; frames are discarded when unset
    pub port: Option<String>,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl SerialConfig {
    /// Transmission limits for the transmitter
    pub fn link_config(&self) -> LinkConfig {
        LinkConfig {
            timeout_ms: self.timeout_ms,
            max_retries: self.max_retries,
            retry_backoff_ms: self.retry_backoff_ms,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        let limits = LinkConfig::default();
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: limits.timeout_ms,
            max_retries: limits.max_retries,
            retry_backoff_ms: limits.retry_backoff_ms,
        }
    }
}

/// Handshake waits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandshakeConfig {
    /// Warn when a wait exceeds this many milliseconds; unset waits silently forever
    pub wait_timeout_ms: Option<u64>,
}

impl HandshakeConfig {
    /// Configured wait bound, if any
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl NodeConfig {
    /// Load from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, NodeError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let config: NodeConfig = builder
            .add_source(
                Environment::with_prefix("SENSOR_NODE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse from a TOML document
    pub fn from_toml(toml: &str) -> Result<Self, NodeError> {
        let config: NodeConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the node cannot run with
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.buffer.capacity < 2 {
            return Err(NodeError::InvalidConfig(format!(
                "buffer.capacity must be at least 2, got {}",
                self.buffer.capacity
            )));
        }
        if self.sampling.batch_size == 0 {
            return Err(NodeError::InvalidConfig(
                "sampling.batch_size must be greater than 0".to_string(),
            ));
        }
        if self.link.baud_rate == 0 {
            return Err(NodeError::InvalidConfig(
                "link.baud_rate must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.buffer.capacity, 100);
        assert_eq!(config.sampling.batch_size, 30);
        assert_eq!(config.sampling.interval(), Duration::from_secs(1));
        assert_eq!(config.sampling.lock_scope, LockScope::Batch);
        assert_eq!(config.sensors.pir_address, 0x01);
        assert_eq!(config.sensors.addresses(), SensorAddresses::default());
        assert_eq!(config.sampling.source, SourceKind::Simulated);
        assert_eq!(config.link.baud_rate, 115_200);
        assert_eq!(config.handshake.wait_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = NodeConfig::from_toml(
            r#"
            [buffer]
            capacity = 16
            snapshot = "full_storage"

            [sampling]
            interval_ms = 250
            lock_scope = "sample"

            [sensors]
            bus = "/dev/i2c-0"
            ldr_address = 0x23

            [link]
            port = "/dev/ttyUSB0"
            "#,
        )
        .unwrap();

        assert_eq!(config.buffer.capacity, 16);
        assert_eq!(config.buffer.snapshot, SnapshotPolicy::FullStorage);
        assert_eq!(config.sampling.interval_ms, 250);
        assert_eq!(config.sampling.batch_size, 30);
        assert_eq!(config.sampling.lock_scope, LockScope::Sample);
        assert_eq!(config.sensors.bus, "/dev/i2c-0");
        assert_eq!(config.sensors.addresses().ldr, 0x23);
        assert_eq!(config.sensors.pir_address, 0x01);
        assert_eq!(config.sampling.source, SourceKind::Simulated);
        assert_eq!(config.link.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.link.link_config().timeout_ms, 2000);
    }

    #[test]
    fn test_source_kind_selects_i2c() {
        let config = NodeConfig::from_toml("[sampling]\nsource = \"i2c\"\n").unwrap();
        assert_eq!(config.sampling.source, SourceKind::I2c);
        assert_eq!(config.sampling.batch_size, 30);

        let err = NodeConfig::from_toml("[sampling]\nsource = \"spi\"\n").unwrap_err();
        assert!(matches!(err, NodeError::Config(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = NodeConfig::from_toml("[buffer]\ncapacity = 1\n").unwrap_err();
        assert!(matches!(err, NodeError::InvalidConfig(_)));

        let err = NodeConfig::from_toml("[sampling]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(err, NodeError::InvalidConfig(_)));
    }
}
