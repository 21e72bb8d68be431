// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gitbelld - The gitbell daemon.
//!
//! Polls GitHub for new issues in tracked repositories and raises desktop
//! alerts. State lives in a SQLite database under `~/.local/state/gitbell/`
//! shared with the `gitbell` CLI, which talks to the daemon over a Unix
//! socket.
//!
//! Usage:
//!   gitbelld --state-dir <path>

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use gb_core::db::DB_FILE_NAME;
use gb_core::{env, GitHubClient, Settings, SqliteStore, Storage};
use tokio::net::UnixListener;
use tokio::sync::{mpsc, Notify};

use gitbelld::alert;
use gitbelld::dispatch::{Dispatcher, SystemOpener};
use gitbelld::scheduler::Scheduler;
use gitbelld::server::{self, ServerState};
use gitbelld::{Engine, Result};

/// Socket filename within daemon directory.
const SOCKET_NAME: &str = "daemon.sock";
/// PID filename within daemon directory.
const PID_NAME: &str = "daemon.pid";
/// Lock filename for single instance guarantee.
const LOCK_NAME: &str = "daemon.lock";
/// Log filename within daemon directory.
const LOG_NAME: &str = "daemon.log";

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let state_dir = parse_state_dir(&args);
    if let Err(e) = fs::create_dir_all(&state_dir) {
        eprintln!("failed to create {}: {}", state_dir.display(), e);
        std::process::exit(1);
    }

    setup_logging(&state_dir.join(LOG_NAME));
    tracing::info!("gitbelld starting, state_dir={}", state_dir.display());

    // Acquire file lock for single instance
    let lock_file = match acquire_lock(&state_dir.join(LOCK_NAME)) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("failed to acquire lock: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let pid_path = state_dir.join(PID_NAME);
    if let Err(e) = write_pid_file(&pid_path) {
        tracing::error!("failed to write PID file: {}", e);
        std::process::exit(1);
    }

    let socket_path = state_dir.join(SOCKET_NAME);
    let code = match serve(&state_dir, &socket_path).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            1
        }
    };

    cleanup(&pid_path, &socket_path);
    drop(lock_file);
    tracing::info!("gitbelld stopped");
    std::process::exit(code);
}

async fn serve(state_dir: &Path, socket_path: &Path) -> Result<()> {
    let store = SqliteStore::open(&state_dir.join(DB_FILE_NAME))?;
    let storage = Arc::new(Storage::new(Arc::new(store)));

    let first_run = !storage.has_settings()?;
    let settings = if first_run {
        storage.update_settings(|_| {})?
    } else {
        storage.settings()?
    };

    let (activation_tx, mut activation_rx) = mpsc::unbounded_channel();
    let alerter = alert::detect(activation_tx).await;
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&storage),
        alerter,
        Arc::new(SystemOpener),
    ));
    let engine = Arc::new(Engine::new(
        Arc::clone(&storage),
        Arc::new(GitHubClient::new()),
        Arc::clone(&dispatcher),
    ));
    let scheduler = Arc::new(Scheduler::new(Arc::clone(&engine)));

    // Remove stale socket if it exists
    let _ = fs::remove_file(socket_path);
    let listener = UnixListener::bind(socket_path)?;
    tracing::info!("listening on {}", socket_path.display());

    // Signal readiness to parent process
    println!("READY");
    let _ = std::io::stdout().flush();

    if first_run {
        welcome(&dispatcher, &settings).await;
    }

    {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            while let Some(activation) = activation_rx.recv().await {
                dispatcher.handle(activation).await;
            }
        });
    }

    scheduler.schedule(i64::from(settings.check_interval_minutes))?;

    let shutdown = Arc::new(Notify::new());
    let state = Arc::new(ServerState {
        engine,
        scheduler: Arc::clone(&scheduler),
        started: Instant::now(),
        shutdown: Arc::clone(&shutdown),
    });

    tokio::select! {
        _ = server::run(listener, state) => {}
        _ = shutdown.notified() => tracing::info!("shutting down"),
    }
    scheduler.shutdown();
    Ok(())
}

async fn welcome(dispatcher: &Dispatcher, settings: &Settings) {
    if !settings.notifications_enabled {
        return;
    }
    if let Err(e) = dispatcher.welcome().await {
        tracing::warn!("failed to show welcome alert: {}", e);
    }
}

fn parse_state_dir(args: &[String]) -> PathBuf {
    for i in 0..args.len() {
        if args[i] == "--state-dir" {
            if let Some(dir) = args.get(i + 1) {
                return PathBuf::from(dir);
            }
        }
    }
    env::resolve_state_dir()
}

fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(env::names::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Try to open log file, fall back to stderr
    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn acquire_lock(lock_path: &Path) -> std::io::Result<fs::File> {
    use fs2::FileExt;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| std::io::Error::other("another gitbelld instance is already running"))?;
    Ok(file)
}

fn write_pid_file(pid_path: &Path) -> std::io::Result<()> {
    fs::write(pid_path, format!("{}", std::process::id()))
}

fn cleanup(pid_path: &Path, socket_path: &Path) {
    let _ = fs::remove_file(pid_path);
    let _ = fs::remove_file(socket_path);
}
