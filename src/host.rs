//! The echo host session loop.
//!
//! A session announces [`HostReady`], then alternates between awaiting a
//! frame and acknowledging it until the peer closes the stream or a frame
//! fails to decode. There is no retry: any read or decode failure is
//! terminal for the session. Diagnostics go to the tracing subscriber (the
//! side log), never to the protocol stream itself.

use serde_json::Value;
use tokio::io::AsyncWrite;

use crate::frame::{FrameSource, FrameWriter};
use crate::protocol::{Ack, HostReady};
use crate::Result;

/// How an echo-host session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of frames acknowledged before the session ended.
    pub frames_acked: u64,
}

/// An echo-host session over a frame source and sink.
///
/// Generic over [`FrameSource`] so tests can drive the loop from pre-seeded
/// frames instead of a live stream.
pub struct EchoHost<S, W> {
    source: S,
    writer: FrameWriter<W>,
}

impl<S, W> EchoHost<S, W>
where
    S: FrameSource + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Create a session over the given source and sink.
    pub fn new(source: S, sink: W) -> Self {
        Self {
            source,
            writer: FrameWriter::new(sink),
        }
    }

    /// Run the session to completion.
    ///
    /// Sends `HOST_READY`, then acknowledges every inbound frame. Returns
    /// `Ok` with a summary when the peer closes the stream, or the terminal
    /// error after logging it.
    pub async fn run(mut self) -> Result<SessionSummary> {
        self.writer.write_frame(&HostReady::new()).await?;
        tracing::debug!("sent HOST_READY, awaiting frames");

        let mut frames_acked = 0u64;
        loop {
            match self.source.read_frame().await {
                Ok(Some(message)) => {
                    tracing::debug!(%message, "received frame");
                    let ack = Ack::for_message(&message);
                    self.writer.write_frame(&ack).await?;
                    frames_acked += 1;
                }
                Ok(None) => {
                    tracing::debug!(frames_acked, "peer closed stream, session done");
                    return Ok(SessionSummary { frames_acked });
                }
                Err(e) => {
                    tracing::warn!(error = %e, frames_acked, "session aborted");
                    return Err(e);
                }
            }
        }
    }
}

/// Echo the `id` of an inbound message into an acknowledgement value.
///
/// Convenience for callers that frame their own responses.
pub fn ack_for(message: &Value) -> Value {
    serde_json::to_value(Ack::for_message(message)).unwrap_or(Value::Null)
}
