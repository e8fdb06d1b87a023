//! Sensor Error Types

use crate::SensorKind;
use thiserror::Error;

/// Errors that can occur while sampling a sensor.
///
/// All of them are fatal to the sampling task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// Bus transaction failed
    #[error("Bus error reading {kind} at 0x{address:02X}: {reason}")]
    Bus {
        kind: SensorKind,
        address: u8,
        reason: String,
    },

    /// Source can no longer produce samples
    #[error("Sensor {0} unavailable")]
    Unavailable(SensorKind),
}
