//! Launching and supervising the companion process.
//!
//! The launcher sits between the browser and the real native-messaging host:
//! the browser spawns the launcher, the launcher spawns the companion with
//! the parent's standard streams inherited, and every byte of the protocol
//! flows through untouched. Stderr is passed through unmodified. The parent
//! exits with the companion's exit code.
//!
//! ```text
//! browser                     launcher                    companion
//! ┌─────────┐   stdin/stdout  ┌─────────┐  inherited fds  ┌─────────┐
//! │         │◀───────────────▶│         │◀───────────────▶│         │
//! └─────────┘                 └─────────┘                 └─────────┘
//! ```

use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};

use crate::config::LauncherConfig;
use crate::{Error, Result};

/// A running companion process.
///
/// The handle is scoped: dropping it kills a still-running companion, so the
/// child can never outlive the launcher unsupervised.
#[derive(Debug)]
pub struct CompanionProcess {
    child: Child,
}

impl CompanionProcess {
    /// Spawn the companion described by `config` with inherited stdio.
    ///
    /// The companion reads and writes the launcher's own standard streams
    /// directly; the launcher never touches the protocol bytes.
    pub fn spawn(config: &LauncherConfig) -> Result<Self> {
        let mut cmd = build_command(config);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ProgramNotFound {
                    program: config.program().to_string(),
                }
            } else {
                Error::ProcessSpawn(e)
            }
        })?;

        tracing::debug!(program = config.program(), pid = child.id(), "spawned companion");
        Ok(Self { child })
    }

    /// Get the process ID of the running companion.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Check if the companion is still running.
    pub fn is_running(&self) -> bool {
        self.child.id().is_some()
    }

    /// Wait for the companion to exit and return its exit status.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        self.child.wait().await.map_err(Error::io)
    }

    /// Kill the companion immediately and reap it.
    pub async fn kill(&mut self) -> Result<()> {
        self.child.kill().await.map_err(Error::io)
    }

    /// Request the companion be killed without waiting.
    pub fn start_kill(&mut self) -> Result<()> {
        self.child.start_kill().map_err(Error::io)
    }
}

impl Drop for CompanionProcess {
    fn drop(&mut self) {
        // Kill the companion if it's still running
        let _ = self.start_kill();
    }
}

/// Spawn the companion, wait for it, and return the code to exit with.
///
/// Exit status is mapped to the companion's exit code; a companion killed by
/// a signal (no exit code) maps to 1.
pub async fn run_to_completion(config: &LauncherConfig) -> Result<i32> {
    let mut companion = CompanionProcess::spawn(config)?;
    let status = companion.wait().await?;
    let code = exit_code(status);
    tracing::debug!(code, "companion exited");
    Ok(code)
}

/// Build a tokio Command from the config.
fn build_command(config: &LauncherConfig) -> Command {
    let mut cmd = Command::new(config.program());
    cmd.args(config.args());

    if let Some(dir) = config.working_directory() {
        cmd.current_dir(dir);
    }

    if !config.inherit_env() {
        cmd.env_clear();
    }
    for (key, value) in config.env() {
        cmd.env(key, value);
    }

    cmd
}

/// Map an exit status to the code the launcher should exit with.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
