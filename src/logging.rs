//! The diagnostic trail.
//!
//! Native-messaging hosts own stdout for protocol frames, so diagnostics can
//! never go there. This module routes `tracing` events to an append-only log
//! file (or stderr) instead. The log is opened explicitly at process start
//! and held as a value for the life of the process — there is no hardcoded
//! global path.
//!
//! Filtering follows `RUST_LOG` when set, defaulting to `info`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Where diagnostics are written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    File(PathBuf),
    Stderr,
}

/// An open diagnostic trail.
///
/// Installs the process-wide `tracing` subscriber on creation. Hold the
/// value until the process ends; the file is opened in append mode so
/// successive runs extend the same trail.
#[derive(Debug)]
pub struct DiagnosticLog {
    destination: Destination,
}

impl DiagnosticLog {
    /// Append diagnostics to the given file, creating it if needed.
    pub fn to_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(Error::io)?;
        install(Mutex::new(file), false)?;
        Ok(Self {
            destination: Destination::File(path.to_path_buf()),
        })
    }

    /// Write diagnostics to stderr.
    ///
    /// Useful when a supervisor already captures stderr; the protocol stream
    /// on stdout is unaffected either way.
    pub fn to_stderr() -> Result<Self> {
        install(std::io::stderr, true)?;
        Ok(Self {
            destination: Destination::Stderr,
        })
    }

    /// The log file path, if logging to a file.
    pub fn path(&self) -> Option<&Path> {
        match &self.destination {
            Destination::File(path) => Some(path),
            Destination::Stderr => None,
        }
    }
}

fn install<W>(writer: W, ansi: bool) -> Result<()>
where
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::InvalidConfig(format!("diagnostic log already installed: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the subscriber install is process-global, so ordering
    // between separate #[test] functions would be nondeterministic.
    #[test]
    fn file_log_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.log");

        let log = DiagnosticLog::to_file(&path).unwrap();
        assert_eq!(log.path(), Some(path.as_path()));

        tracing::info!("host starting");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("host starting"));

        // A second install must fail rather than silently swap subscribers
        let second = DiagnosticLog::to_file(dir.path().join("b.log"));
        assert!(matches!(second, Err(Error::InvalidConfig(_))));

        // Append mode: events after the failed install extend the same trail
        tracing::info!("still appending");
        let contents_after = std::fs::read_to_string(&path).unwrap();
        assert!(contents_after.contains("host starting"));
        assert!(contents_after.contains("still appending"));
    }
}
