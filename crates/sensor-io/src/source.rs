//! Sample Source Trait

use crate::{SensorError, SensorKind};
use ring_buffer::SensorReading;

/// One blocking read per sensor kind
///
/// Reads may block the calling thread for as long as the bus takes. Async
/// callers should keep them off the executor, e.g. with
/// `tokio::task::block_in_place`.
pub trait SampleSource: Send {
    /// Read a single raw value from the given sensor; may block
    fn read(&mut self, kind: SensorKind) -> Result<f32, SensorError>;

    /// Read all three sensors in order PIR, humidity/heat, LDR
    fn sample_all(&mut self) -> Result<SensorReading, SensorError> {
        Ok(SensorReading {
            pir: self.read(SensorKind::Pir)?,
            humidity_heat: self.read(SensorKind::HumidityHeat)?,
            ldr: self.read(SensorKind::Ldr)?,
        })
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn read(&mut self, kind: SensorKind) -> Result<f32, SensorError> {
        (**self).read(kind)
    }
}
