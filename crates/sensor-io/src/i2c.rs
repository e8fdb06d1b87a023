//! I2C-backed sample source

use crate::{decode_raw, SampleSource, SensorAddresses, SensorError, SensorKind};
use embedded_hal::i2c::{Error as _, I2c};
use tracing::{debug, trace};

/// Reads each sensor with a two-byte I2C read from its 7-bit address
pub struct I2cSampleSource<I> {
    bus: I,
    addresses: SensorAddresses,
}

impl<I: I2c> I2cSampleSource<I> {
    /// Create a source on the given bus
    pub fn new(bus: I, addresses: SensorAddresses) -> Self {
        debug!("Creating I2C sample source: {:?}", addresses);
        Self { bus, addresses }
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.bus
    }
}

impl<I: I2c + Send> SampleSource for I2cSampleSource<I> {
    fn read(&mut self, kind: SensorKind) -> Result<f32, SensorError> {
        let address = self.addresses.address(kind);
        let mut raw = [0u8; 2];

        self.bus
            .read(address, &mut raw)
            .map_err(|e| SensorError::Bus {
                kind,
                address,
                reason: format!("{:?}", e.kind()),
            })?;

        let value = decode_raw(raw);
        trace!("{} @0x{:02X} raw={:02X?} value={}", kind, address, raw, value);
        Ok(value)
    }
}
