//! Typed messages exchanged by the echo host.
//!
//! Native-messaging payloads are consumer-defined JSON; the only shapes this
//! crate commits to are the two the echo host sends. Arbitrary inbound frames
//! decode to [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Announcement sent once when the host starts, before any frames are read.
///
/// Serializes to `{"type": "HOST_READY"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReady {
    /// Message discriminator, always `"HOST_READY"`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl HostReady {
    pub const KIND: &'static str = "HOST_READY";

    pub fn new() -> Self {
        Self {
            kind: Self::KIND.to_string(),
        }
    }
}

impl Default for HostReady {
    fn default() -> Self {
        Self::new()
    }
}

/// Acknowledgement for one received frame.
///
/// Serializes to `{"id": <echoed id>, "success": true}`. The `id` echoes the
/// incoming frame's `id` field and is JSON `null` when the frame had none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    /// The `id` of the frame being acknowledged, or null.
    #[serde(default)]
    pub id: Value,
    /// Whether the frame was processed.
    pub success: bool,
}

impl Ack {
    /// Build the acknowledgement for an inbound frame, echoing its `id`.
    pub fn for_message(message: &Value) -> Self {
        Self {
            id: message.get("id").cloned().unwrap_or(Value::Null),
            success: true,
        }
    }
}
