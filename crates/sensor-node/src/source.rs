//! Sample source selection

use crate::config::{NodeConfig, SourceKind};
use crate::NodeError;
use sensor_io::{SampleSource, SimulatedSource};
use tracing::info;

/// Build the source named by `sampling.source`
pub fn build_source(config: &NodeConfig) -> Result<Box<dyn SampleSource>, NodeError> {
    match config.sampling.source {
        SourceKind::Simulated => {
            info!("Using simulated sensors (seed {})", config.sampling.seed);
            Ok(Box::new(SimulatedSource::new(config.sampling.seed)))
        }
        SourceKind::I2c => open_i2c(config),
    }
}

#[cfg(feature = "linux-i2c")]
fn open_i2c(config: &NodeConfig) -> Result<Box<dyn SampleSource>, NodeError> {
    use sensor_io::I2cSampleSource;

    let bus = &config.sensors.bus;
    let device = linux_embedded_hal::I2cdev::new(bus)
        .map_err(|e| NodeError::SourceInit(format!("{}: {}", bus, e)))?;
    info!("Using I2C sensors on {}: {:?}", bus, config.sensors.addresses());
    Ok(Box::new(I2cSampleSource::new(device, config.sensors.addresses())))
}

#[cfg(not(feature = "linux-i2c"))]
fn open_i2c(config: &NodeConfig) -> Result<Box<dyn SampleSource>, NodeError> {
    Err(NodeError::SourceInit(format!(
        "{}: built without the linux-i2c feature",
        config.sensors.bus
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_source_by_default() {
        let mut source = build_source(&NodeConfig::default()).unwrap();
        let reading = source.sample_all().unwrap();
        assert!(reading.pir >= 0.0);
        assert!(reading.ldr <= u16::MAX as f32);
    }

    #[test]
    fn test_i2c_source_reports_missing_bus() {
        let mut config = NodeConfig::default();
        config.sampling.source = SourceKind::I2c;
        config.sensors.bus = "/dev/i2c-sensor-node-missing".to_string();

        match build_source(&config) {
            Err(NodeError::SourceInit(reason)) => {
                assert!(reason.starts_with("/dev/i2c-sensor-node-missing"))
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("opened a bus that does not exist"),
        }
    }
}
