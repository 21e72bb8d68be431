// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unix socket server for CLI requests.
//!
//! One request and one response per connection. Pass-related requests are
//! forwarded to the [`Scheduler`]; everything else is answered here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use gb_ipc::{async_framing, DaemonRequest, DaemonResponse, DaemonStatus};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::engine::Engine;
use crate::scheduler::Scheduler;

/// Time allowed for a client to send its request.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared state handed to every connection.
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub scheduler: Arc<Scheduler>,
    pub started: Instant,
    /// Notified once a shutdown request has been acknowledged.
    pub shutdown: Arc<Notify>,
}

/// Accept connections until the task is dropped.
pub async fn run(listener: UnixListener, state: Arc<ServerState>) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, &state).await {
                        warn!("connection error: {}", e);
                    }
                });
            }
            Err(e) => warn!("failed to accept connection: {}", e),
        }
    }
}

async fn handle_connection(mut stream: UnixStream, state: &ServerState) -> std::io::Result<()> {
    let request: DaemonRequest =
        tokio::time::timeout(READ_TIMEOUT, async_framing::read_message(&mut stream))
            .await
            .map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out reading request")
            })??;
    debug!(?request, "request");

    let response = handle_request(request, state).await;
    let shutting_down = matches!(response, DaemonResponse::ShuttingDown);
    async_framing::write_message(&mut stream, &response).await?;
    if shutting_down {
        state.shutdown.notify_one();
    }
    Ok(())
}

pub(crate) async fn handle_request(request: DaemonRequest, state: &ServerState) -> DaemonResponse {
    match request {
        DaemonRequest::Ping => DaemonResponse::Pong,
        DaemonRequest::Hello { version: _ } => DaemonResponse::Hello {
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        DaemonRequest::Shutdown => DaemonResponse::ShuttingDown,
        DaemonRequest::Status => DaemonResponse::Status(DaemonStatus {
            interval_minutes: state.scheduler.interval_minutes(),
            pass_running: state.engine.is_running(),
            rate_limit: state.engine.last_rate_limit(),
            last_pass_at: state.engine.last_pass_at(),
            ..DaemonStatus::new(std::process::id(), state.started.elapsed().as_secs())
        }),
        DaemonRequest::CheckNow | DaemonRequest::UpdateInterval { .. } => {
            state.scheduler.on_external_request(request).await
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
