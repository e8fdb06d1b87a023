//! Sensor Sampling
//!
//! Abstracts one blocking read per sensor kind. Each sensor sits at a fixed
//! 7-bit I2C address and answers with a big-endian 16-bit raw value, which
//! is widened to `f32` without scaling or calibration.

mod error;
mod i2c;
mod kind;
mod simulated;
mod source;

pub use error::SensorError;
pub use i2c::I2cSampleSource;
pub use kind::{decode_raw, SensorAddresses, SensorKind};
pub use simulated::SimulatedSource;
pub use source::SampleSource;

/// Default 7-bit device addresses
pub mod address {
    /// Passive infrared sensor
    pub const PIR: u8 = 0x01;
    /// Humidity and heat sensor
    pub const HUMIDITY_HEAT: u8 = 0x02;
    /// Light dependent resistor
    pub const LDR: u8 = 0x03;
}
