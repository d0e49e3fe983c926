//! Registry wire framing.
//!
//! Framed messages are a magic byte `0x00`, the writer schema id as a
//! big-endian `u32`, then the Avro datum.

use crate::error::{Result, SerdeError};
use bytes::{Buf, BufMut};

pub const MAGIC_BYTE: u8 = 0x00;

/// Magic byte plus schema id.
pub const HEADER_LEN: usize = 5;

/// Prefix `datum` with the frame header for `schema_id`.
pub fn frame(schema_id: u32, datum: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + datum.len());
    buf.put_u8(MAGIC_BYTE);
    buf.put_u32(schema_id);
    buf.put_slice(datum);
    buf
}

/// Split a framed message into its schema id and datum.
pub fn unframe(mut message: &[u8]) -> Result<(u32, &[u8])> {
    if message.len() < HEADER_LEN {
        return Err(SerdeError::InvalidFrame(format!(
            "message is {} bytes, shorter than the {HEADER_LEN}-byte header",
            message.len()
        )));
    }

    let magic = message.get_u8();
    if magic != MAGIC_BYTE {
        return Err(SerdeError::InvalidFrame(format!(
            "unknown magic byte 0x{magic:02x}"
        )));
    }

    let schema_id = message.get_u32();
    Ok((schema_id, message))
}
