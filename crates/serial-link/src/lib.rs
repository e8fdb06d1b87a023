//! Serial Link to the BLE Bridge
//!
//! Serializes summary records into fixed 48-byte frames and writes them to
//! a byte sink (normally a UART at 115200 8N1 feeding a BLE module) with a
//! bounded, retrying send.

mod error;
mod frame;
mod port;
mod transmitter;

pub use error::LinkError;
pub use frame::{decode, encode, FRAME_LEN};
pub use port::{open_serial, DEFAULT_BAUD_RATE};
pub use transmitter::{LinkConfig, Transmitter};
