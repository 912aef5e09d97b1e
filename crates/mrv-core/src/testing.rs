// Test doubles shared by handler and poller unit tests.
//
// `ScriptedSession` stands in for the SSH transport: each command maps
// to a canned reply or a failure mode, and every interaction is
// recorded through shared handles that outlive the session move.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mrv_session::{DeviceSession, Error as SessionError};
use tokio_util::sync::CancellationToken;

use crate::report::{ReportSink, ValidationReport};

// ── ScriptedSession ─────────────────────────────────────────────────

#[derive(Clone, Copy)]
pub(crate) enum FailureMode {
    /// Per-command failure: recoverable, entry stays absent.
    Command,
    /// Transport failure: fatal, the session is unusable afterwards.
    Fatal,
}

enum Reply {
    Text(String),
    Fail(FailureMode),
}

pub(crate) struct ScriptedSession {
    replies: HashMap<String, Reply>,
    executed: Arc<Mutex<Vec<String>>>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedSession {
    pub(crate) fn new() -> Self {
        Self {
            replies: HashMap::new(),
            executed: Arc::new(Mutex::new(Vec::new())),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn reply(mut self, command: &str, output: &str) -> Self {
        self.replies
            .insert(command.to_owned(), Reply::Text(output.to_owned()));
        self
    }

    pub(crate) fn fail(mut self, command: &str, mode: FailureMode) -> Self {
        self.replies.insert(command.to_owned(), Reply::Fail(mode));
        self
    }

    /// Shared handle to the executed-command log; survives the session
    /// being moved into a handler.
    pub(crate) fn executed_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.executed)
    }

    /// Shared close counter.
    pub(crate) fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }
}

#[async_trait]
impl DeviceSession for ScriptedSession {
    async fn execute(&mut self, command: &str) -> Result<String, SessionError> {
        self.executed.lock().unwrap().push(command.to_owned());

        match self.replies.get(command) {
            Some(Reply::Text(output)) => Ok(output.clone()),
            Some(Reply::Fail(FailureMode::Command)) => Err(SessionError::CommandTimeout {
                command: command.to_owned(),
                timeout_secs: 1,
            }),
            Some(Reply::Fail(FailureMode::Fatal)) => Err(SessionError::SessionClosed),
            None => Ok(String::new()),
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ── RecordingSink ───────────────────────────────────────────────────

/// Collects emitted reports; optionally cancels a token after N reports
/// so continuous-mode tests can wind down deterministically.
pub(crate) struct RecordingSink {
    pub(crate) reports: Vec<ValidationReport>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self {
            reports: Vec::new(),
            cancel_after: None,
        }
    }

    pub(crate) fn cancel_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((count, token));
        self
    }
}

impl ReportSink for RecordingSink {
    fn emit(&mut self, report: &ValidationReport) {
        self.reports.push(report.clone());
        if let Some((count, token)) = &self.cancel_after {
            if self.reports.len() >= *count {
                token.cancel();
            }
        }
    }
}
