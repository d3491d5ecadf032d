// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scratch repositories for git tests.
//!
//! ```text
//! tmp/
//!   upstream/   repo with one commit
//!   hub/        repo with one commit + submodule repos/<name> -> upstream
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use super::runner::GitRunner;

/// Author/committer identity so commits work without a global config.
pub(crate) const IDENTITY_ENV: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Test"),
    ("GIT_AUTHOR_EMAIL", "test@test.com"),
    ("GIT_COMMITTER_NAME", "Test"),
    ("GIT_COMMITTER_EMAIL", "test@test.com"),
];

/// Allows cloning local paths as submodules (blocked by default since 2.38).
pub(crate) const FILE_PROTOCOL_ENV: [(&str, &str); 3] = [
    ("GIT_CONFIG_COUNT", "1"),
    ("GIT_CONFIG_KEY_0", "protocol.file.allow"),
    ("GIT_CONFIG_VALUE_0", "always"),
];

/// Runs git synchronously, panicking with stderr on failure.
pub(crate) fn run_git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .envs(IDENTITY_ENV)
        .envs(FILE_PROTOCOL_ENV)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initializes a repository with one committed file.
pub(crate) fn init_repo_with_commit(dir: &Path) {
    std::fs::create_dir_all(dir).expect("failed to create repo dir");
    run_git(dir, &["init", "-q"]);
    std::fs::write(dir.join("README.md"), "# test\n").expect("failed to write file");
    run_git(dir, &["add", "."]);
    run_git(dir, &["commit", "-q", "-m", "initial"]);
}

/// Runner that can clone local upstreams and commit.
pub(crate) fn test_runner() -> GitRunner {
    IDENTITY_ENV
        .into_iter()
        .chain(FILE_PROTOCOL_ENV)
        .fold(GitRunner::default(), |runner, (key, value)| {
            runner.with_env(key, value)
        })
}

/// A hub repository with one registered submodule.
pub(crate) struct HubFixture {
    _tmp: TempDir,
    pub hub: PathBuf,
    pub upstream: PathBuf,
}

impl HubFixture {
    /// Creates `upstream` and `hub`, registering `repos/<name>` in the hub.
    pub(crate) fn with_submodule(name: &str) -> Self {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let upstream = tmp.path().join("upstream");
        let hub = tmp.path().join("hub");
        init_repo_with_commit(&upstream);
        init_repo_with_commit(&hub);

        let url = upstream.to_string_lossy().into_owned();
        let path = format!("repos/{name}");
        run_git(&hub, &["submodule", "add", "-q", &url, &path]);
        run_git(&hub, &["commit", "-q", "-m", "add submodule"]);

        Self {
            _tmp: tmp,
            hub,
            upstream,
        }
    }

    /// Commits a new file in the upstream repository.
    pub(crate) fn advance_upstream(&self, file: &str) {
        std::fs::write(self.upstream.join(file), file).expect("failed to write file");
        run_git(&self.upstream, &["add", "."]);
        run_git(&self.upstream, &["commit", "-q", "-m", file]);
    }
}
