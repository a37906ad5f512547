//! Test utilities for nmhost integration tests.

use std::collections::VecDeque;

use serde_json::{json, Value};

use nmhost::frame::{encode_frame, FrameSource};
use nmhost::{Error, Result};

/// A mock frame source that returns pre-defined frames.
///
/// Frames are returned in order, then `Ok(None)` is returned to signal end
/// of stream.
pub struct MockFrameSource {
    frames: VecDeque<Result<Value>>,
}

impl MockFrameSource {
    /// Create a new mock source with the given frames.
    pub fn new(frames: Vec<Value>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
        }
    }

    /// Create a mock source that will return an error after its frames.
    pub fn with_error(mut frames: Vec<Value>, error: Error) -> Self {
        let mut queue: VecDeque<Result<Value>> = frames.drain(..).map(Ok).collect();
        queue.push_back(Err(error));
        Self { frames: queue }
    }
}

impl FrameSource for MockFrameSource {
    async fn read_frame(&mut self) -> Result<Option<Value>> {
        match self.frames.pop_front() {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

/// Builder for realistic client-side frame sequences.
pub struct ScenarioBuilder {
    frames: Vec<Value>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Add a request frame with the given id.
    pub fn request(mut self, id: u64) -> Self {
        self.frames.push(json!({"id": id, "action": "ping"}));
        self
    }

    /// Add an arbitrary frame.
    pub fn frame(mut self, value: Value) -> Self {
        self.frames.push(value);
        self
    }

    /// Build a mock source yielding the frames then end of stream.
    pub fn build(self) -> MockFrameSource {
        MockFrameSource::new(self.frames)
    }

    /// Encode the frames to wire bytes, as a browser would send them.
    pub fn to_wire_bytes(self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for frame in &self.frames {
            bytes.extend(encode_frame(frame).expect("test frames encode"));
        }
        bytes
    }
}
