//! Echo host for exercising native-messaging extensions.
//!
//! Speaks the length-prefixed JSON protocol over stdin/stdout: announces
//! `HOST_READY`, then acknowledges every frame with `{"id": ..., "success":
//! true}` until the browser closes the stream. Stderr is left untouched;
//! diagnostics go to the log file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use nmhost::frame::FrameReader;
use nmhost::{DiagnosticLog, EchoHost};

#[derive(Parser, Debug)]
#[command(name = "nmhost-echo", version, about = "Native-messaging echo host")]
struct Args {
    /// Append diagnostics to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log = match open_log(args.log_file.as_deref()) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("nmhost-echo: {e}");
            return ExitCode::FAILURE;
        }
    };

    let reader = FrameReader::new(tokio::io::stdin());
    let session = EchoHost::new(reader, tokio::io::stdout());

    match session.run().await {
        Ok(summary) => {
            tracing::info!(frames_acked = summary.frames_acked, "session complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "session failed");
            ExitCode::FAILURE
        }
    }
}

fn open_log(path: Option<&std::path::Path>) -> nmhost::Result<DiagnosticLog> {
    match path {
        Some(path) => DiagnosticLog::to_file(path),
        None => DiagnosticLog::to_stderr(),
    }
}
