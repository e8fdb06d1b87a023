//! Serial port setup

use crate::LinkError;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::info;

/// Default UART baud rate for the BLE bridge
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Open a serial port as 8N1 with no flow control
pub fn open_serial(path: &str, baud_rate: u32) -> Result<SerialStream, LinkError> {
    info!("Opening serial port {} at {} baud", path, baud_rate);

    tokio_serial::new(path, baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open_native_async()
        .map_err(|e| LinkError::Serial(e.to_string()))
}
