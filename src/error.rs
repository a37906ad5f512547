/// Errors that can occur when using nmhost.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time
/// - Spawn errors: failed to start the companion process
/// - IO errors: communication failures on the frame stream
/// - Frame errors: a frame on the wire that cannot be decoded
///
/// End of stream is not represented here: readers signal it by returning
/// `Ok(None)`, since a peer closing the connection at a frame boundary is
/// the normal shutdown path rather than a failure.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Spawn errors
    // -------------------------------------------------------------------------
    /// Companion program not found.
    #[error("companion program not found: {program}")]
    ProgramNotFound { program: String },

    /// Failed to spawn the companion process.
    #[error("failed to spawn companion process: {0}")]
    ProcessSpawn(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // IO errors
    // -------------------------------------------------------------------------
    /// IO error on the frame stream.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Frame errors
    // -------------------------------------------------------------------------
    /// The stream ended before a complete frame was read.
    ///
    /// `expected` is the number of bytes the frame declared (or the prefix
    /// width, if the prefix itself was cut short); `actual` is how many of
    /// them were available before end of stream.
    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    TruncatedFrame { expected: usize, actual: usize },

    /// Frame payload is not valid UTF-8 JSON.
    #[error("malformed payload: {message}")]
    MalformedPayload {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for nmhost operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io(source)
    }

    /// Create a malformed-payload error with a snippet of the offending bytes.
    pub fn malformed_payload(source: serde_json::Error, raw: &[u8]) -> Self {
        let snippet: String = String::from_utf8_lossy(raw).chars().take(100).collect();
        Self::MalformedPayload {
            message: format!("at position {}: {}", source.column(), snippet),
            source,
        }
    }

    /// Check if this error means the frame stream is unusable.
    ///
    /// All frame and IO errors are terminal for the current channel session;
    /// there is no retry or partial recovery.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::TruncatedFrame { .. } | Error::MalformedPayload { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPayload {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn is_terminal_detection() {
        assert!(Error::TruncatedFrame {
            expected: 10,
            actual: 3
        }
        .is_terminal());
        assert!(Error::io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed"
        ))
        .is_terminal());
        assert!(!Error::InvalidConfig("empty program".into()).is_terminal());
        assert!(!Error::ProgramNotFound {
            program: "node".into()
        }
        .is_terminal());
    }

    #[test]
    fn malformed_payload_snippet_is_bounded() {
        let long = vec![b'x'; 4096];
        let source = serde_json::from_slice::<serde_json::Value>(&long).unwrap_err();
        let err = Error::malformed_payload(source, &long);
        match err {
            Error::MalformedPayload { message, .. } => {
                assert!(message.len() < 200, "snippet should be truncated");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::MalformedPayload { .. }));
    }

    #[test]
    fn question_mark_operator_io() {
        fn fallible_io() -> Result<()> {
            let _file = std::fs::File::open("/nonexistent/path/that/does/not/exist")?;
            Ok(())
        }
        let result = fallible_io();
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn question_mark_operator_json() {
        fn fallible_json() -> Result<()> {
            let _: serde_json::Value = serde_json::from_str("not valid json")?;
            Ok(())
        }
        let result = fallible_json();
        assert!(matches!(result, Err(Error::MalformedPayload { .. })));
    }
}
