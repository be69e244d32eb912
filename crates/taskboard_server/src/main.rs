//! Server entry point.

use clap::Parser;
use log::error;
use std::process::ExitCode;
use taskboard_core::{init_logging, init_stderr_logging};
use taskboard_server::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    let logging = match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.log_level(), dir),
        None => init_stderr_logging(config.log_level()),
    };
    if let Err(err) = logging {
        eprintln!("taskboard_server: logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    match taskboard_server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("taskboard_server: {err}");
            ExitCode::FAILURE
        }
    }
}
