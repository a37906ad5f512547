//! Length-prefixed frame encoding and decoding over byte buffers.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

/// Width of the frame length prefix in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Encode a message as a single frame.
///
/// The message is serialized to UTF-8 JSON and prefixed with its byte length
/// as a little-endian u32. No upper bound on message size is enforced.
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(LENGTH_PREFIX_LEN + 128);
    encode_frame_into(message, &mut buf)?;
    Ok(buf)
}

/// Encode a message as a single frame, appending to an existing buffer.
pub fn encode_frame_into<T: Serialize>(message: &T, buf: &mut Vec<u8>) -> Result<()> {
    let payload = serde_json::to_vec(message)?;
    let len = u32::try_from(payload.len())
        .map_err(|_| Error::InvalidConfig(format!("payload too large: {} bytes", payload.len())))?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(())
}

/// Decode one frame from a byte slice.
///
/// Returns the decoded value and the number of bytes consumed. An empty
/// slice decodes to `Ok(None)` (end of stream at a frame boundary); a slice
/// that ends mid-prefix or mid-payload is a [`Error::TruncatedFrame`].
pub fn decode_frame<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<(T, usize)>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    if bytes.len() < LENGTH_PREFIX_LEN {
        return Err(Error::TruncatedFrame {
            expected: LENGTH_PREFIX_LEN,
            actual: bytes.len(),
        });
    }

    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    prefix.copy_from_slice(&bytes[..LENGTH_PREFIX_LEN]);
    let declared = u32::from_le_bytes(prefix) as usize;

    let payload = &bytes[LENGTH_PREFIX_LEN..];
    if payload.len() < declared {
        return Err(Error::TruncatedFrame {
            expected: declared,
            actual: payload.len(),
        });
    }

    let payload = &payload[..declared];
    let value = serde_json::from_slice(payload).map_err(|e| Error::malformed_payload(e, payload))?;
    Ok(Some((value, LENGTH_PREFIX_LEN + declared)))
}
