//! Async frame readers and writers.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::codec::LENGTH_PREFIX_LEN;
use crate::{Error, Result};

/// Anything frames can be read from.
///
/// [`FrameReader`] is the production implementation; tests substitute a mock
/// source with pre-seeded frames.
pub trait FrameSource {
    /// Read the next frame.
    ///
    /// Returns `Ok(Some(value))` for each frame, `Ok(None)` at end of stream,
    /// or `Err` on IO or decode failure.
    fn read_frame(&mut self) -> impl Future<Output = Result<Option<Value>>> + Send;
}

/// Reads length-prefixed JSON frames from a byte stream.
///
/// Reading blocks (asynchronously) until the requested byte count is
/// available or the stream closes. Each call to [`read_frame`] consumes
/// exactly one complete frame or fails; there is no partial-frame buffering
/// between calls.
///
/// [`read_frame`]: FrameReader::read_frame
pub struct FrameReader<R> {
    reader: R,
}

impl<R: AsyncRead + Unpin + Send> FrameReader<R> {
    /// Create a new reader over a byte stream.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the next frame as a JSON value.
    ///
    /// Returns `Ok(None)` if the stream is closed at a frame boundary (zero
    /// bytes available) — the normal termination condition. A stream that
    /// ends mid-prefix or mid-payload yields [`Error::TruncatedFrame`], and a
    /// payload that is not valid UTF-8 JSON yields [`Error::MalformedPayload`].
    pub async fn read_frame(&mut self) -> Result<Option<Value>> {
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        let got = self.read_up_to(&mut prefix).await?;
        if got == 0 {
            return Ok(None);
        }
        if got < LENGTH_PREFIX_LEN {
            return Err(Error::TruncatedFrame {
                expected: LENGTH_PREFIX_LEN,
                actual: got,
            });
        }

        let declared = u32::from_le_bytes(prefix) as usize;
        let mut payload = vec![0u8; declared];
        let got = self.read_up_to(&mut payload).await?;
        if got < declared {
            return Err(Error::TruncatedFrame {
                expected: declared,
                actual: got,
            });
        }

        let value =
            serde_json::from_slice(&payload).map_err(|e| Error::malformed_payload(e, &payload))?;
        Ok(Some(value))
    }

    /// Read the next frame, deserialized into a typed message.
    pub async fn read_frame_as<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        match self.read_frame().await? {
            Some(value) => {
                let payload = value.to_string();
                let typed = serde_json::from_value(value)
                    .map_err(|e| Error::malformed_payload(e, payload.as_bytes()))?;
                Ok(Some(typed))
            }
            None => Ok(None),
        }
    }

    /// Fill `buf` as far as the stream allows, returning the byte count.
    ///
    /// Unlike `read_exact`, a stream that closes early returns the short
    /// count instead of an opaque `UnexpectedEof`, so callers can tell a
    /// clean close (zero bytes) from a truncated frame.
    async fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.reader.read(&mut buf[filled..]).await.map_err(Error::io)?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

impl<R: AsyncRead + Unpin + Send + 'static> FrameReader<R> {
    /// Convert this reader into an async stream of frames.
    ///
    /// Kept in its own impl block: [`FrameStream`] stores the reader in a
    /// boxed future, so only this conversion needs `R: 'static`; borrowed
    /// readers can still use [`read_frame`](FrameReader::read_frame).
    pub fn into_stream(self) -> FrameStream<R> {
        FrameStream::new(self)
    }
}

impl<R: AsyncRead + Unpin + Send> FrameSource for FrameReader<R> {
    async fn read_frame(&mut self) -> Result<Option<Value>> {
        FrameReader::read_frame(self).await
    }
}

/// Writes length-prefixed JSON frames to a byte stream.
///
/// The stream is flushed after every frame so the receiver is never left
/// waiting on buffered data.
pub struct FrameWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> FrameWriter<W> {
    /// Create a new writer over a byte stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encode and write one frame, then flush.
    pub async fn write_frame<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let frame = super::codec::encode_frame(message)?;
        self.writer.write_all(&frame).await.map_err(Error::io)?;
        self.writer.flush().await.map_err(Error::io)?;
        Ok(())
    }

    /// Flush and shut down the underlying stream.
    ///
    /// Signals end of stream to the peer; no further frames can be written.
    pub async fn shutdown(mut self) -> Result<()> {
        self.writer.shutdown().await.map_err(Error::io)?;
        Ok(())
    }
}

/// An async stream of decoded frames.
///
/// Created by [`FrameReader::into_stream`]. Implements [`futures::Stream`]
/// for use with async combinators; the stream terminates at end of stream
/// and after yielding any error.
pub struct FrameStream<R> {
    reader: Option<FrameReader<R>>,
    #[allow(clippy::type_complexity)]
    pending: Option<Pin<Box<dyn Future<Output = (FrameReader<R>, Result<Option<Value>>)> + Send>>>,
}

impl<R: AsyncRead + Unpin + Send + 'static> FrameStream<R> {
    /// Create a new stream from a frame reader.
    pub fn new(reader: FrameReader<R>) -> Self {
        Self {
            reader: Some(reader),
            pending: None,
        }
    }
}

impl<R: AsyncRead + Unpin + Send + 'static> futures::Stream for FrameStream<R> {
    type Item = Result<Value>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // If we have a pending future, poll it
        if let Some(ref mut pending) = self.pending {
            match pending.as_mut().poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready((reader, result)) => {
                    self.pending = None;
                    match result {
                        Ok(Some(value)) => {
                            self.reader = Some(reader);
                            return Poll::Ready(Some(Ok(value)));
                        }
                        Ok(None) => return Poll::Ready(None),
                        Err(e) => return Poll::Ready(Some(Err(e))),
                    }
                }
            }
        }

        // Take the reader and create a new read future
        if let Some(mut reader) = self.reader.take() {
            let fut = Box::pin(async move {
                let result = reader.read_frame().await;
                (reader, result)
            });
            self.pending = Some(fut);
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        // No reader available, stream is exhausted
        Poll::Ready(None)
    }
}
