// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command runner.
//!
//! ```text
//! GitRunner::run(root, args, timeout)
//!      |
//!      v
//! ProcessBuilder(git) cwd=root, capture, non-interactive env
//!      |
//!      +-- Ok(output)            --> CommandResult { stdout, stderr, code }
//!      +-- spawn/timeout/cancel  --> CommandResult { "", message, -1 }
//! ```
//!
//! Every call returns a [`CommandResult`]. Nothing here returns an error
//! or panics on a failed invocation, so callers treat a missing binary,
//! a hung fetch and a rejected path the same way.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::model::CommandResult;
use super::ops;
use crate::config::types::GitConfig;
use crate::core::process::builder::{OutputLine, ProcessBuilder};

/// Timeout applied when the caller passes none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for the read-only status query.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment that keeps git from prompting for credentials.
pub const NON_INTERACTIVE_ENV: [(&str, &str); 2] =
    [("GIT_TERMINAL_PROMPT", "0"), ("GCM_INTERACTIVE", "never")];

/// Runs git subcommands against a repository root.
///
/// Holds no state across calls; cloning is cheap enough to hand one to
/// every worker.
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: PathBuf,
    default_timeout: Duration,
    status_timeout: Duration,
    env: Vec<(String, String)>,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            default_timeout: DEFAULT_TIMEOUT,
            status_timeout: STATUS_TIMEOUT,
            env: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &GitConfig) -> Self {
        Self::new(&config.program)
            .with_default_timeout(Duration::from_secs(config.timeout_secs))
            .with_status_timeout(Duration::from_secs(config.status_timeout_secs))
    }

    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_status_timeout(mut self, timeout: Duration) -> Self {
        self.status_timeout = timeout;
        self
    }

    /// Adds an environment variable for every invocation.
    ///
    /// The non-interactive variables are applied last and cannot be
    /// overridden this way.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    #[must_use]
    pub const fn status_timeout(&self) -> Duration {
        self.status_timeout
    }

    /// Runs `git <args>` in `repo_root` and waits for it.
    pub async fn run(
        &self,
        repo_root: &Path,
        args: &[impl AsRef<str>],
        timeout: Option<Duration>,
    ) -> CommandResult {
        self.execute(repo_root, args, timeout, None, None).await
    }

    /// Like [`GitRunner::run`], killing the process once `token` fires.
    pub async fn run_with_cancellation(
        &self,
        repo_root: &Path,
        args: &[impl AsRef<str>],
        timeout: Option<Duration>,
        token: CancellationToken,
    ) -> CommandResult {
        self.execute(repo_root, args, timeout, Some(token), None)
            .await
    }

    /// Like [`GitRunner::run`], also sending each output line to `sink` as
    /// it is read. The returned result still carries the full output.
    pub async fn run_streaming(
        &self,
        repo_root: &Path,
        args: &[impl AsRef<str>],
        timeout: Option<Duration>,
        sink: flume::Sender<OutputLine>,
    ) -> CommandResult {
        self.execute(repo_root, args, timeout, None, Some(sink))
            .await
    }

    /// Synchronous variant of [`GitRunner::run`].
    ///
    /// Safe to call from any thread. Inside an async runtime the command is
    /// driven on a scoped helper thread, so the caller's runtime is never
    /// blocked on from within itself.
    pub fn run_blocking(
        &self,
        repo_root: &Path,
        args: &[impl AsRef<str>],
        timeout: Option<Duration>,
    ) -> CommandResult {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();

        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_fresh_runtime(repo_root, &args, timeout);
        }

        std::thread::scope(|scope| {
            scope
                .spawn(|| self.block_on_fresh_runtime(repo_root, &args, timeout))
                .join()
                .unwrap_or_else(|_| CommandResult::launch_failure("git runner thread panicked"))
        })
    }

    /// Runs `git submodule status` with the status timeout.
    pub async fn submodule_status(&self, repo_root: &Path) -> CommandResult {
        self.run(repo_root, &ops::status_args(), Some(self.status_timeout))
            .await
    }

    pub(crate) async fn execute(
        &self,
        repo_root: &Path,
        args: &[impl AsRef<str>],
        timeout: Option<Duration>,
        token: Option<CancellationToken>,
        sink: Option<flume::Sender<OutputLine>>,
    ) -> CommandResult {
        let mut process = self.process(repo_root, args, timeout);
        if let Some(sink) = sink {
            process = process.line_sink(sink);
        }

        let outcome = match token {
            Some(token) => process.run_with_cancellation(token).await,
            None => process.run().await,
        };

        match outcome {
            Ok(output) => {
                let (stdout, stderr, exit_code) = output.into_parts();
                debug!(exit_code, "git finished");
                CommandResult::new(stdout, stderr, exit_code)
            }
            Err(e) => {
                debug!(error = %e, "git did not run to completion");
                CommandResult::launch_failure(e)
            }
        }
    }

    fn process(
        &self,
        repo_root: &Path,
        args: &[impl AsRef<str>],
        timeout: Option<Duration>,
    ) -> ProcessBuilder {
        let mut process = ProcessBuilder::new(self.resolved_program())
            .name("git")
            .args(args.iter().map(|arg| AsRef::<str>::as_ref(arg)))
            .cwd(repo_root)
            .timeout(timeout.unwrap_or(self.default_timeout))
            .capture_output();

        for (key, value) in &self.env {
            process = process.env(key, value);
        }
        for (key, value) in NON_INTERACTIVE_ENV {
            process = process.env(key, value);
        }
        process
    }

    /// Bare program names are looked up in PATH once and cached.
    fn resolved_program(&self) -> PathBuf {
        match self.program.to_str() {
            Some(name) if !name.contains(['/', '\\']) => {
                ProcessBuilder::find(name).unwrap_or_else(|| self.program.clone())
            }
            _ => self.program.clone(),
        }
    }

    fn block_on_fresh_runtime(
        &self,
        repo_root: &Path,
        args: &[String],
        timeout: Option<Duration>,
    ) -> CommandResult {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.run(repo_root, args, timeout)),
            Err(e) => CommandResult::launch_failure(format!("failed to start runtime: {e}")),
        }
    }
}

/// Runs `git <args>` in `repo_root` with default settings.
pub async fn run_command(
    repo_root: &Path,
    args: &[impl AsRef<str>],
    timeout: Option<Duration>,
) -> CommandResult {
    GitRunner::default().run(repo_root, args, timeout).await
}

/// Blocking counterpart of [`run_command`].
pub fn run_command_blocking(
    repo_root: &Path,
    args: &[impl AsRef<str>],
    timeout: Option<Duration>,
) -> CommandResult {
    GitRunner::default().run_blocking(repo_root, args, timeout)
}
