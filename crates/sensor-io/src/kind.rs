//! Sensor Kinds and Raw Decoding

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three sensors sampled every iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Passive infrared motion sensor
    Pir,
    /// Combined humidity and heat sensor
    HumidityHeat,
    /// Light dependent resistor
    Ldr,
}

impl SensorKind {
    /// All kinds in sampling and transmission order
    pub const ALL: [SensorKind; 3] = [SensorKind::Pir, SensorKind::HumidityHeat, SensorKind::Ldr];

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::Pir => "pir",
            SensorKind::HumidityHeat => "humidity_heat",
            SensorKind::Ldr => "ldr",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Device address of each sensor on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorAddresses {
    pub pir: u8,
    pub humidity_heat: u8,
    pub ldr: u8,
}

impl SensorAddresses {
    /// Look up the address for a kind
    pub fn address(&self, kind: SensorKind) -> u8 {
        match kind {
            SensorKind::Pir => self.pir,
            SensorKind::HumidityHeat => self.humidity_heat,
            SensorKind::Ldr => self.ldr,
        }
    }
}

impl Default for SensorAddresses {
    fn default() -> Self {
        Self {
            pir: crate::address::PIR,
            humidity_heat: crate::address::HUMIDITY_HEAT,
            ldr: crate::address::LDR,
        }
    }
}

/// Decode a raw two-byte response: big-endian u16 widened to f32
pub fn decode_raw(bytes: [u8; 2]) -> f32 {
    u16::from_be_bytes(bytes) as f32
}
