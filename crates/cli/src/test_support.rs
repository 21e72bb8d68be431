// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! Test infrastructure for command testing.
//!
//! [`TestContext`] wraps an in-memory state store and a temporary state
//! directory. [`FakeDaemon`] answers daemon requests on that directory's
//! socket so IPC paths can be exercised without spawning gitbelld.

use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gb_core::github::CredentialCheck;
use gb_core::{
    FetchError, Issue, IssuePage, IssueSource, MemoryStore, NotificationRecord, RateLimit,
    ResourceId, Storage,
};
use gb_ipc::{framing, DaemonRequest, DaemonResponse, DaemonStatus};
use tempfile::TempDir;

use crate::daemon::get_socket_path;

/// PID written by fake daemons; far above any real pid_max.
pub const FAKE_PID: u32 = 2_000_000_000;

pub struct TestContext {
    pub storage: Storage,
    pub state_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        TestContext {
            storage: Storage::new(Arc::new(MemoryStore::new())),
            state_dir: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        }
    }

    pub fn track(&self, full_name: &str) -> &Self {
        let id: ResourceId = full_name.parse().unwrap();
        self.storage.add_repository(&id).unwrap();
        self
    }

    pub fn notify(&self, resource: &str, number: u64, labels: &[&str]) -> &Self {
        let issue = Issue::new(
            number,
            format!("Issue {number}"),
            format!("https://github.com/{resource}/issues/{number}"),
            labels.iter().map(|l| l.to_string()).collect(),
        );
        self.storage
            .add_notification(NotificationRecord::new(resource, &issue, chrono::Utc::now()))
            .unwrap();
        self
    }
}

/// Writer capturing command output as a string.
#[derive(Default)]
pub struct Output(pub Vec<u8>);

impl Output {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl std::io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

type Responder = dyn Fn(&DaemonRequest) -> DaemonResponse + Send + Sync;

/// A socket server in a background thread that records requests and answers
/// them with a caller-supplied function.
pub struct FakeDaemon {
    requests: Arc<Mutex<Vec<DaemonRequest>>>,
}

impl FakeDaemon {
    /// Answer with [`default_response`].
    pub fn start(state_dir: &Path) -> Self {
        Self::with_responder(state_dir, default_response)
    }

    pub fn with_responder(
        state_dir: &Path,
        respond: impl Fn(&DaemonRequest) -> DaemonResponse + Send + Sync + 'static,
    ) -> Self {
        let listener = UnixListener::bind(get_socket_path(state_dir)).unwrap();
        std::fs::write(state_dir.join("daemon.pid"), FAKE_PID.to_string()).unwrap();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let respond: Box<Responder> = Box::new(respond);
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Ok(request) = framing::read_message::<_, DaemonRequest>(&mut stream) else {
                    continue;
                };
                let response = respond(&request);
                recorded.lock().unwrap().push(request);
                let _ = framing::write_message(&mut stream, &response);
            }
        });
        FakeDaemon { requests }
    }

    /// Requests received so far, excluding liveness pings.
    pub fn requests(&self) -> Vec<DaemonRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| **r != DaemonRequest::Ping)
            .cloned()
            .collect()
    }
}

pub fn default_response(request: &DaemonRequest) -> DaemonResponse {
    match request {
        DaemonRequest::Ping => DaemonResponse::Pong,
        DaemonRequest::CheckNow => DaemonResponse::check_ok(0),
        DaemonRequest::UpdateInterval { .. } => DaemonResponse::interval_ok(),
        DaemonRequest::Status => {
            let mut status = DaemonStatus::new(FAKE_PID, 125);
            status.interval_minutes = Some(10);
            DaemonResponse::Status(status)
        }
        DaemonRequest::Shutdown => DaemonResponse::ShuttingDown,
        DaemonRequest::Hello { .. } => DaemonResponse::Hello {
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

/// Issue source answering existence and credential checks from fixed data.
#[derive(Default)]
pub struct FakeSource {
    pub existing: Vec<String>,
    pub valid_token: Option<String>,
    pub failure: Option<FetchError>,
    pub tokens: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn fetch_open_issues(
        &self,
        _id: &ResourceId,
        _token: Option<&str>,
    ) -> Result<IssuePage, FetchError> {
        Ok(IssuePage {
            issues: Vec::new(),
            rate_limit: RateLimit::default(),
        })
    }

    async fn resource_exists(
        &self,
        id: &ResourceId,
        token: Option<&str>,
    ) -> Result<bool, FetchError> {
        self.tokens.lock().unwrap().push(token.map(str::to_string));
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        Ok(self.existing.contains(&id.full_name()))
    }

    async fn validate_credential(&self, token: &str) -> Result<CredentialCheck, FetchError> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        if self.valid_token.as_deref() == Some(token) {
            Ok(CredentialCheck {
                valid: true,
                login: Some("octocat".to_string()),
                name: Some("The Octocat".to_string()),
            })
        } else {
            Ok(CredentialCheck::default())
        }
    }
}
