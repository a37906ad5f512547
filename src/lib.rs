//! # nmhost
//!
//! Chrome native-messaging plumbing: a length-prefixed JSON frame channel,
//! an echo host for exercising extensions end to end, and a launcher that
//! hands the protocol streams to a companion process.
//!
//! ## Wire format
//!
//! Every message on the wire is one frame: a 4-byte little-endian u32 length
//! prefix followed by exactly that many bytes of UTF-8 JSON. See the
//! [`frame`] module for the protocol decision on byte order.
//!
//! ## Framing
//!
//! ```no_run
//! use nmhost::frame::{FrameReader, FrameWriter};
//! use nmhost::Result;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut writer = FrameWriter::new(tokio::io::stdout());
//!     writer.write_frame(&json!({"type": "HOST_READY"})).await?;
//!
//!     let mut reader = FrameReader::new(tokio::io::stdin());
//!     while let Some(message) = reader.read_frame().await? {
//!         tracing::debug!(%message, "received frame");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Launching a companion
//!
//! ```no_run
//! use nmhost::config::LauncherConfig;
//! use nmhost::process;
//! use nmhost::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = LauncherConfig::builder()
//!         .program("node")
//!         .arg("host.cjs")
//!         .build()?;
//!     let code = process::run_to_completion(&config).await?;
//!     std::process::exit(code);
//! }
//! ```

pub mod config;
mod error;
pub mod frame;
pub mod host;
pub mod logging;
pub mod process;
pub mod protocol;

pub use error::{Error, Result};

// Re-export the channel types at crate root
pub use frame::{FrameReader, FrameWriter};
pub use host::EchoHost;
pub use logging::DiagnosticLog;
