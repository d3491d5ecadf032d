// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              HubError (~24 bytes)
//!                     |
//!   +------+------+------+------+------+
//!   |      |      |      |      |      |
//!   v      v      v      v      v      v
//! Bail    Git   Config Process Exec   Io
//! Box<str> Box   Box    Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git      NotARepository, CommandFailed, NothingSelected, InvalidName, Gix
//!   Config   ParseError, MissingKey, InvalidValue
//!   Process  SpawnFailed, Timeout, Interrupted
//!   Executor SlotBusy, Disconnected, NoRuntime
//!
//! All variants boxed => HubError fits in 24 bytes.
//! ```
//!
//! The reconciler and the command runner never return these: their
//! failures are folded into empty listings and `CommandResult` values.
//! Typed errors only surface from configuration, the CLI layer, and the
//! process primitives underneath the runner.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HubError`].
pub type HubResult<T> = std::result::Result<T, HubError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum HubError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Command executor error.
    #[error("executor error: {0}")]
    Executor(#[from] Box<ExecutorError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`HubError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> HubError {
    HubError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for HubError {
                fn from(err: $error) -> Self {
                    HubError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    ExecutorError => Executor,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The path has no repository marker at its root.
    #[error("not a git repository (no .git at root): {path}")]
    NotARepository { path: String },

    /// One or more git commands exited unsuccessfully.
    #[error("{failed} of {total} git command(s) failed")]
    CommandFailed { failed: usize, total: usize },

    /// A batch operation was requested without any submodule paths.
    #[error("no submodules selected for '{action}'")]
    NothingSelected { action: String },

    /// A submodule name or path argument is unusable.
    #[error("invalid submodule name '{name}': {message}")]
    InvalidName { name: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration source.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Process was cancelled and killed.
    #[error("process '{command}' was cancelled")]
    Interrupted { command: String },

    /// Failed while waiting on the process or reading its output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Executor Errors ---

/// Async command executor errors.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The slot already has a command in flight.
    #[error("command #{id} is still running")]
    SlotBusy { id: u64 },

    /// The worker went away without delivering a completion.
    #[error("worker for command #{id} disconnected")]
    Disconnected { id: u64 },

    /// No tokio runtime is available to run commands on.
    #[error("no async runtime available: {message}")]
    NoRuntime { message: String },
}
