//! The framed message channel.
//!
//! Chrome native messaging exchanges discrete JSON messages over a raw byte
//! stream. Each frame is a fixed-width length prefix followed by exactly that
//! many bytes of UTF-8 JSON:
//!
//! ```text
//! +------------------+--------------------+
//! | length (4 bytes) | payload (N bytes)  |
//! +------------------+--------------------+
//! ```
//!
//! - **length**: u32, little-endian, the payload size in bytes
//! - **payload**: UTF-8 JSON text
//!
//! The length prefix is always little-endian. The convention this channel
//! implements leaves byte order to the host platform, which is non-portable;
//! this crate fixes it as a protocol decision.
//!
//! # Decoding outcomes
//!
//! [`FrameReader::read_frame`] returns `Ok(Some(value))` for each complete
//! frame and `Ok(None)` when the stream closes at a frame boundary — the
//! normal shutdown signal, not an error. A stream that ends mid-frame is
//! [`Error::TruncatedFrame`](crate::Error::TruncatedFrame); a payload that is
//! not valid UTF-8 JSON is
//! [`Error::MalformedPayload`](crate::Error::MalformedPayload). Both are
//! terminal for the channel session.
//!
//! Exactly one frame is in flight at a time: the reader and writer each take
//! `&mut self`, and no partial-frame state survives between calls.

mod codec;
mod io;

pub use codec::{decode_frame, encode_frame, encode_frame_into, LENGTH_PREFIX_LEN};
pub use io::{FrameReader, FrameSource, FrameStream, FrameWriter};
