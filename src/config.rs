//! Configuration for launching a companion process.
//!
//! The launcher wraps a single companion command — typically the real
//! native-messaging host the browser manifest cannot point at directly —
//! and forwards the parent's standard streams to it.
//!
//! # Example
//!
//! ```
//! use nmhost::config::LauncherConfig;
//!
//! let config = LauncherConfig::builder()
//!     .program("node")
//!     .arg("host.cjs")
//!     .env("NODE_ENV", "production")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.program(), "node");
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::{Error, Result};

/// Description of the companion command to launch.
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    program: String,
    args: Vec<String>,
    working_directory: Option<PathBuf>,
    env: BTreeMap<String, String>,
    inherit_env: bool,
    log_path: Option<PathBuf>,
}

impl LauncherConfig {
    /// Start building a config.
    pub fn builder() -> LauncherConfigBuilder {
        LauncherConfigBuilder::default()
    }

    /// The companion program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the companion.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Working directory for the companion, if overridden.
    pub fn working_directory(&self) -> Option<&PathBuf> {
        self.working_directory.as_ref()
    }

    /// Extra environment variables for the companion.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Whether the companion inherits the parent environment.
    pub fn inherit_env(&self) -> bool {
        self.inherit_env
    }

    /// Where the diagnostic trail should be written, if anywhere.
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_path.as_ref()
    }
}

/// Builder for [`LauncherConfig`].
///
/// Validation happens in [`build`](LauncherConfigBuilder::build); an empty
/// program is rejected with [`Error::InvalidConfig`].
#[derive(Debug, Clone, Default)]
pub struct LauncherConfigBuilder {
    program: Option<String>,
    args: Vec<String>,
    working_directory: Option<PathBuf>,
    env: BTreeMap<String, String>,
    inherit_env: Option<bool>,
    log_path: Option<PathBuf>,
}

impl LauncherConfigBuilder {
    /// Set the companion program.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the companion.
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Set one environment variable for the companion.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Whether the companion inherits the parent environment (default: true).
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = Some(inherit);
        self
    }

    /// Write the diagnostic trail to this file.
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Validate and build the config.
    pub fn build(self) -> Result<LauncherConfig> {
        let program = self.program.unwrap_or_default();
        if program.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "companion program must not be empty".to_string(),
            ));
        }

        Ok(LauncherConfig {
            program,
            args: self.args,
            working_directory: self.working_directory,
            env: self.env,
            inherit_env: self.inherit_env.unwrap_or(true),
            log_path: self.log_path,
        })
    }
}
