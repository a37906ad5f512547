//! Companion-process launcher.
//!
//! Spawns the given command with stdin/stdout/stderr inherited, so the
//! native-messaging byte stream flows straight through, then exits with the
//! companion's exit code. Browser manifests that cannot point at the real
//! host directly point here instead.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use nmhost::config::LauncherConfig;
use nmhost::{process, DiagnosticLog};

#[derive(Parser, Debug)]
#[command(
    name = "nmhost-launcher",
    version,
    about = "Spawn a companion process with inherited stdio"
)]
struct Args {
    /// Append diagnostics to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Working directory for the companion.
    #[arg(long)]
    working_directory: Option<PathBuf>,

    /// Companion program to run.
    program: String,

    /// Arguments passed to the companion, flags included.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("nmhost-launcher: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log = match open_log(&config) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("nmhost-launcher: {e}");
            return ExitCode::FAILURE;
        }
    };

    match process::run_to_completion(&config).await {
        Ok(code) => {
            // Exit code of the launcher equals the exit code of the companion
            ExitCode::from(u8::try_from(code.clamp(0, 255)).unwrap_or(1))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to run companion");
            ExitCode::FAILURE
        }
    }
}

fn build_config(args: &Args) -> nmhost::Result<LauncherConfig> {
    let mut builder = LauncherConfig::builder()
        .program(&args.program)
        .args(args.args.iter().cloned());
    if let Some(dir) = &args.working_directory {
        builder = builder.working_directory(dir);
    }
    if let Some(path) = &args.log_file {
        builder = builder.log_path(path);
    }
    builder.build()
}

fn open_log(config: &LauncherConfig) -> nmhost::Result<DiagnosticLog> {
    match config.log_path() {
        Some(path) => DiagnosticLog::to_file(path),
        None => DiagnosticLog::to_stderr(),
    }
}
