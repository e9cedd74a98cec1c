// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slipway daemon (slipwayd)
//!
//! Background process that owns the task store, the status hub, and the
//! execution supervisor, and serves them over a Unix socket.

use std::path::PathBuf;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use slipway_daemon::config::{Config, Settings};
use slipway_daemon::lifecycle::{self, LifecycleError};

/// Startup marker prefix written to the log before anything else.
/// Full format: "--- slipwayd: starting (pid: 12345) ---"
const STARTUP_MARKER_PREFIX: &str = "--- slipwayd: starting (pid: ";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // An optional argument names the settings file; the default is
    // slipway.toml in the working directory, absent meaning defaults
    let args: Vec<String> = std::env::args().collect();
    let cwd = std::env::current_dir()?;
    let settings = if args.len() > 1 {
        Settings::load(&PathBuf::from(&args[1]))?
    } else {
        Settings::load_or_default(&cwd.join("slipway.toml"))?
    };
    let config = Config::resolve(&settings, &cwd);

    // Write startup marker to log (before tracing setup, so tooling
    // tailing the log can find where this attempt begins)
    write_startup_marker(&config)?;

    let log_guard = setup_logging(&config)?;

    info!(base_dir = %config.base_dir.display(), "Starting slipwayd");

    let mut daemon = match lifecycle::startup(&config).await {
        Ok(d) => d,
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config, &e);
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        "Daemon ready, listening on {}",
        config.socket_path.display()
    );

    // Signal ready for parent process (e.g., systemd, tooling waiting for startup)
    println!("READY");

    tokio::select! {
        result = daemon.serve() => result?,

        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
        }

        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
        }
    }

    daemon.shutdown()?;
    info!("Daemon stopped");
    Ok(())
}

/// Write startup marker to log file (appends to existing log)
fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;

    std::fs::create_dir_all(&config.state_dir)?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}{})", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to log file.
/// This ensures the error is visible even if the process exits quickly.
fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(&config.state_dir)?;

    let file_appender = tracing_appender::rolling::never(&config.state_dir, "slipwayd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
