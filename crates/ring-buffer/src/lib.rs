//! Sensor Reading Ring Buffer
//!
//! Provides the fixed-capacity circular buffer shared between the sampling
//! task and the statistics task, plus the lock-guarded handle both tasks use.

mod buffer;
mod shared;

pub use buffer::{BufferError, CircularBuffer, SnapshotPolicy, DEFAULT_CAPACITY};
pub use shared::SharedBuffer;

use serde::{Deserialize, Serialize};

/// One sample of all three sensors, taken in a single producer iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Passive infrared motion sensor
    pub pir: f32,
    /// Combined humidity and heat sensor
    pub humidity_heat: f32,
    /// Light dependent resistor
    pub ldr: f32,
}

impl SensorReading {
    /// Create a new reading
    pub fn new(pir: f32, humidity_heat: f32, ldr: f32) -> Self {
        Self {
            pir,
            humidity_heat,
            ldr,
        }
    }
}
