// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Asynchronous command execution.
//!
//! ```text
//! caller                  runtime
//! ------                  -------
//! submit(req) ----------> worker task: GitRunner::execute (own subprocess)
//!   PendingCommand               |
//!     wait / try_take  <--- flume(1) <-- supervisor: Completion, callback
//!     cancel ------------> child token (killed, exit -1)
//!
//! shutdown() cancels the parent token of every child token.
//!
//! CommandSlot: one in-flight command; batches run strictly one after
//! another, continuing past failures.
//! ```
//!
//! Every submission yields exactly one [`Completion`], including when the
//! worker panics or is cancelled.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::model::CommandResult;
use super::runner::GitRunner;
use crate::core::process::builder::OutputLine;
use crate::error::{ExecutorError, HubResult};

type Callback = Box<dyn FnOnce(&Completion) + Send + 'static>;

/// One git invocation to run in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub repo_root: PathBuf,
    pub args: Vec<String>,
    /// Falls back to the runner's default timeout.
    pub timeout: Option<Duration>,
}

impl CommandRequest {
    pub fn new<I, S>(repo_root: impl AsRef<Path>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `git <args>` as echoed to the user.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = String::from("git");
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Result of one submitted command.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Completion {
    pub id: u64,
    pub command_line: String,
    pub result: CommandResult,
}

/// Runs git commands on a tokio runtime and reports completions.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    runner: Arc<GitRunner>,
    handle: Handle,
    shutdown: CancellationToken,
    next_id: Arc<AtomicU64>,
}

impl CommandExecutor {
    #[must_use]
    pub fn new(runner: GitRunner, handle: Handle) -> Self {
        Self {
            runner: Arc::new(runner),
            handle,
            shutdown: CancellationToken::new(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates an executor on the runtime of the calling task.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::NoRuntime` outside a tokio runtime.
    pub fn current(runner: GitRunner) -> HubResult<Self> {
        let handle = Handle::try_current().map_err(|e| ExecutorError::NoRuntime {
            message: e.to_string(),
        })?;
        Ok(Self::new(runner, handle))
    }

    #[must_use]
    pub fn runner(&self) -> &GitRunner {
        &self.runner
    }

    /// Starts `request` and returns a handle to its completion.
    pub fn submit(&self, request: CommandRequest) -> PendingCommand {
        self.spawn(request, None, None)
    }

    /// Starts `request`, calling `callback` on the runtime once it finishes.
    ///
    /// The completion is still available from the returned handle.
    pub fn submit_with<F>(&self, request: CommandRequest, callback: F) -> PendingCommand
    where
        F: FnOnce(&Completion) + Send + 'static,
    {
        self.spawn(request, None, Some(Box::new(callback)))
    }

    /// Starts `request`, forwarding output lines while it runs.
    ///
    /// The line receiver disconnects once the command has finished.
    pub fn submit_streaming(
        &self,
        request: CommandRequest,
    ) -> (PendingCommand, flume::Receiver<OutputLine>) {
        let (tx, rx) = flume::unbounded();
        (self.spawn(request, Some(tx), None), rx)
    }

    /// Cancels every in-flight and future command of this executor.
    pub fn shutdown(&self) {
        debug!("executor shutdown requested");
        self.shutdown.cancel();
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn spawn(
        &self,
        request: CommandRequest,
        sink: Option<flume::Sender<OutputLine>>,
        callback: Option<Callback>,
    ) -> PendingCommand {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let command_line = request.command_line();
        let token = self.shutdown.child_token();
        let (tx, rx) = flume::bounded(1);

        debug!(id, cmd = %command_line, "submitting");

        let runner = Arc::clone(&self.runner);
        let worker_token = token.clone();
        let worker = self.handle.spawn(async move {
            runner
                .execute(
                    &request.repo_root,
                    request.args.as_slice(),
                    request.timeout,
                    Some(worker_token),
                    sink,
                )
                .await
        });

        let supervisor_line = command_line.clone();
        self.handle.spawn(async move {
            let result = match worker.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(id, error = %e, "command worker failed");
                    CommandResult::launch_failure(format!("command worker failed: {e}"))
                }
            };
            let completion = Completion {
                id,
                command_line: supervisor_line,
                result,
            };
            if let Some(callback) = callback {
                callback(&completion);
            }
            if tx.send(completion).is_err() {
                debug!(id, "completion dropped, nobody is waiting");
            }
        });

        PendingCommand {
            id,
            command_line,
            token,
            rx,
            delivered: false,
        }
    }
}

/// Handle to a submitted command.
///
/// Dropping it does not stop the command.
#[derive(Debug)]
pub struct PendingCommand {
    id: u64,
    command_line: String,
    token: CancellationToken,
    rx: flume::Receiver<Completion>,
    delivered: bool,
}

impl PendingCommand {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Requests cancellation; the subprocess is killed and the completion
    /// carries exit code -1.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn wait(self) -> Completion {
        match self.rx.recv_async().await {
            Ok(completion) => completion,
            Err(_) => self.disconnected(),
        }
    }

    /// Blocks the current thread until the command completes.
    ///
    /// Must not be called from a runtime worker thread.
    #[must_use]
    pub fn wait_blocking(self) -> Completion {
        match self.rx.recv() {
            Ok(completion) => completion,
            Err(_) => self.disconnected(),
        }
    }

    /// Returns the completion if it has arrived, at most once.
    pub fn try_take(&mut self) -> Option<Completion> {
        if self.delivered {
            return None;
        }
        let completion = match self.rx.try_recv() {
            Ok(completion) => completion,
            Err(flume::TryRecvError::Empty) => return None,
            Err(flume::TryRecvError::Disconnected) => self.disconnected(),
        };
        self.delivered = true;
        Some(completion)
    }

    fn disconnected(&self) -> Completion {
        let error = ExecutorError::Disconnected { id: self.id };
        warn!(id = self.id, "{error}");
        Completion {
            id: self.id,
            command_line: self.command_line.clone(),
            result: CommandResult::launch_failure(error),
        }
    }
}

/// A slot holding at most one in-flight command.
#[derive(Debug)]
pub struct CommandSlot {
    executor: CommandExecutor,
    in_flight: Option<PendingCommand>,
}

impl CommandSlot {
    #[must_use]
    pub const fn new(executor: CommandExecutor) -> Self {
        Self {
            executor,
            in_flight: None,
        }
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts `request` in the slot without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::SlotBusy` while a previous command has not
    /// been collected with [`CommandSlot::poll`].
    pub fn dispatch(&mut self, request: CommandRequest) -> HubResult<u64> {
        self.ensure_free()?;
        let pending = self.executor.submit(request);
        let id = pending.id();
        self.in_flight = Some(pending);
        Ok(id)
    }

    /// Collects the in-flight completion if it has arrived, freeing the slot.
    pub fn poll(&mut self) -> Option<Completion> {
        let completion = self.in_flight.as_mut()?.try_take()?;
        self.in_flight = None;
        Some(completion)
    }

    /// Cancels the in-flight command, if any.
    pub fn cancel(&self) {
        if let Some(pending) = &self.in_flight {
            pending.cancel();
        }
    }

    /// Runs `request` and waits for it.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::SlotBusy` if a dispatched command is pending.
    pub async fn run(&mut self, request: CommandRequest) -> HubResult<Completion> {
        self.ensure_free()?;
        Ok(self.executor.submit(request).wait().await)
    }

    /// Runs requests one after another; see [`CommandSlot::run_sequence_with`].
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::SlotBusy` if a dispatched command is pending.
    pub async fn run_sequence<I>(&mut self, requests: I) -> HubResult<Vec<Completion>>
    where
        I: IntoIterator<Item = CommandRequest>,
    {
        self.run_sequence_with(requests, |_| {}).await
    }

    /// Runs requests one after another, calling `on_complete` after each.
    ///
    /// A request is submitted only after the previous one completed. Failed
    /// commands do not stop the batch.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::SlotBusy` if a dispatched command is pending.
    pub async fn run_sequence_with<I, F>(
        &mut self,
        requests: I,
        mut on_complete: F,
    ) -> HubResult<Vec<Completion>>
    where
        I: IntoIterator<Item = CommandRequest>,
        F: FnMut(&Completion),
    {
        let mut completions = Vec::new();
        for request in requests {
            let completion = self.run(request).await?;
            on_complete(&completion);
            completions.push(completion);
        }
        Ok(completions)
    }

    fn ensure_free(&self) -> HubResult<()> {
        match &self.in_flight {
            Some(pending) => Err(ExecutorError::SlotBusy { id: pending.id() }.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
