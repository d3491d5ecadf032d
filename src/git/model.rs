// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule records and command results.
//!
//! ```text
//! SubmoduleStatus   Uninitialized | Initialized | Modified
//!                   MergeConflict | Ahead       | Detached
//!
//! SubmoduleRecord   { name, path, url, commit, status, raw_prefix }
//! CommandResult     { stdout, stderr, exit_code (-1 = launch failure) }
//! ```

use serde::Serialize;

/// State of a submodule relative to the commit recorded in the hub.
///
/// `Modified` and `Detached` are never produced by the status prefix
/// mapping; they exist for front-ends that derive richer state on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmoduleStatus {
    Uninitialized,
    Initialized,
    Modified,
    MergeConflict,
    Ahead,
    Detached,
}

impl SubmoduleStatus {
    pub const ALL: [Self; 6] = [
        Self::Uninitialized,
        Self::Initialized,
        Self::Modified,
        Self::MergeConflict,
        Self::Ahead,
        Self::Detached,
    ];

    /// Stable machine-readable key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Modified => "modified",
            Self::MergeConflict => "merge_conflict",
            Self::Ahead => "ahead",
            Self::Detached => "detached",
        }
    }

    /// Human-readable label for tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uninitialized => "not initialized",
            Self::Initialized => "initialized",
            Self::Modified => "modified",
            Self::MergeConflict => "merge conflict",
            Self::Ahead => "ahead of record",
            Self::Detached => "checked out",
        }
    }
}

impl std::fmt::Display for SubmoduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SubmoduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == key)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown status '{s}', expected one of: {}", known.join(", "))
            })
    }
}

/// One submodule as seen in a single reconciliation pass.
///
/// Records are built fresh by the reconciler and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmoduleRecord {
    name: String,
    path: String,
    url: String,
    commit: String,
    status: SubmoduleStatus,
    raw_prefix: String,
}

impl SubmoduleRecord {
    pub(crate) fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        url: impl Into<String>,
        commit: impl Into<String>,
        status: SubmoduleStatus,
        raw_prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            url: url.into(),
            commit: commit.into(),
            status,
            raw_prefix: raw_prefix.into(),
        }
    }

    /// Section name from the manifest (`[submodule "<name>"]`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository-relative path, unique within a snapshot.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Commit hash reported by the status query, empty if unknown.
    #[must_use]
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Commit hash abbreviated to `len` characters for display.
    #[must_use]
    pub fn short_commit(&self, len: usize) -> &str {
        self.commit
            .char_indices()
            .nth(len)
            .map_or(self.commit.as_str(), |(idx, _)| &self.commit[..idx])
    }

    #[must_use]
    pub const fn status(&self) -> SubmoduleStatus {
        self.status
    }

    /// Status marker exactly as the status query printed it ("" when clean).
    #[must_use]
    pub fn raw_prefix(&self) -> &str {
        &self.raw_prefix
    }
}

/// Outcome of one git invocation.
///
/// Produced for every invocation, including ones that never started:
/// spawn failures, timeouts and cancellations carry
/// [`CommandResult::LAUNCH_FAILURE`] and a description in `stderr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl CommandResult {
    /// Exit code reserved for "the tool did not run to completion".
    pub const LAUNCH_FAILURE: i32 = -1;

    #[must_use]
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    #[must_use]
    pub fn launch_failure(message: impl std::fmt::Display) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.to_string(),
            exit_code: Self::LAUNCH_FAILURE,
        }
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    #[must_use]
    pub const fn is_launch_failure(&self) -> bool {
        self.exit_code == Self::LAUNCH_FAILURE
    }
}
