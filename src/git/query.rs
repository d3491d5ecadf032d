// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only hub queries.
//!
//! ```text
//! is_hub_repo     <root>/.git exists (directory or gitfile)
//! current_branch  gix, no subprocess
//! ```

use std::path::Path;

use crate::error::{GitError, GixError, HubResult};

/// Repository marker expected at the hub root.
pub const REPO_MARKER: &str = ".git";

/// Returns `true` if `root` itself carries a repository marker.
///
/// Subdirectories of a repository do not count.
#[must_use]
pub fn is_hub_repo(root: &Path) -> bool {
    root.join(REPO_MARKER).exists()
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(root: &Path) -> HubResult<Option<String>> {
    let repo = gix::discover(root).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
    let head = repo
        .head_name()
        .map_err(|e| GitError::Gix(GixError::Head(e)))?;
    Ok(head.map(|name| name.shorten().to_string()))
}
