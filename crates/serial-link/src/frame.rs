//! Summary Frame Codec
//!
//! Layout: 12 IEEE-754 `f32` values, little-endian, 4 bytes each, in the
//! order PIR (std_dev, max, min, median), humidity/heat (...), LDR (...).

use crate::LinkError;
use stats_engine::{SummaryRecord, SUMMARY_FIELDS};

/// Size of an encoded summary
pub const FRAME_LEN: usize = SUMMARY_FIELDS * 4;

/// Encode a summary record
pub fn encode(record: &SummaryRecord) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    for (chunk, value) in frame.chunks_exact_mut(4).zip(record.values()) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    frame
}

/// Decode a summary record
pub fn decode(bytes: &[u8]) -> Result<SummaryRecord, LinkError> {
    if bytes.len() != FRAME_LEN {
        return Err(LinkError::FrameLength {
            expected: FRAME_LEN,
            actual: bytes.len(),
        });
    }

    let mut values = [0.0f32; SUMMARY_FIELDS];
    for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(4)) {
        *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Ok(SummaryRecord::from_values(values))
}
