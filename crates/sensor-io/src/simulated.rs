//! Simulated sample source for running without hardware

use crate::{decode_raw, SampleSource, SensorError, SensorKind};
use tracing::info;

/// Deterministic pseudo-random sensor values
///
/// Raw values are produced as big-endian byte pairs and go through the same
/// decoding as real bus reads.
pub struct SimulatedSource {
    state: u64,
}

impl SimulatedSource {
    /// Create a simulated source from a seed
    pub fn new(seed: u64) -> Self {
        info!("Creating simulated sample source (seed={})", seed);
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    fn next(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl SampleSource for SimulatedSource {
    fn read(&mut self, kind: SensorKind) -> Result<f32, SensorError> {
        let hash = self.next();
        let raw: u16 = match kind {
            // Motion detected or not
            SensorKind::Pir => (hash % 2) as u16,
            // 20.0-80.0 %RH in tenths
            SensorKind::HumidityHeat => 200 + (hash % 600) as u16,
            // 12-bit ADC count
            SensorKind::Ldr => (hash % 4096) as u16,
        };
        Ok(decode_raw(raw.to_be_bytes()))
    }
}
