// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Argument lists for the git subcommands the hub issues.
//!
//! ```text
//! status_args          submodule status
//! init_update_args     submodule update --init --recursive [paths..]
//! remote_update_args   submodule update --remote <path>
//! add_args             submodule add <url> <path>
//! deinit_args          submodule deinit -f <path>
//! remove_args          rm -f <path>
//! removal_sequence     deinit, then rm (both always issued)
//! ```

use crate::error::{GitError, HubResult};

/// Directory submodules are added under unless configured otherwise.
pub const DEFAULT_SUBMODULE_DIR: &str = "repos";

fn owned<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.into_iter().map(str::to_string).collect()
}

#[must_use]
pub fn status_args() -> Vec<String> {
    owned(["submodule", "status"])
}

/// Initializes and checks out the recorded commit, recursing into nested
/// submodules. An empty `paths` applies to every submodule.
#[must_use]
pub fn init_update_args<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut args = owned(["submodule", "update", "--init", "--recursive"]);
    args.extend(paths.iter().map(|p| p.as_ref().to_string()));
    args
}

/// Moves one submodule to the tip of its remote-tracking branch.
#[must_use]
pub fn remote_update_args(path: &str) -> Vec<String> {
    owned(["submodule", "update", "--remote", path])
}

#[must_use]
pub fn add_args(url: &str, path: &str) -> Vec<String> {
    owned(["submodule", "add", url, path])
}

#[must_use]
pub fn deinit_args(path: &str) -> Vec<String> {
    owned(["submodule", "deinit", "-f", path])
}

#[must_use]
pub fn remove_args(path: &str) -> Vec<String> {
    owned(["rm", "-f", path])
}

/// Commands removing one submodule, in order.
///
/// The steps are independent: callers run the second even when the first
/// fails.
#[must_use]
pub fn removal_sequence(path: &str) -> [Vec<String>; 2] {
    [deinit_args(path), remove_args(path)]
}

/// Path for a new submodule: `<dir>/<name>`.
///
/// # Errors
///
/// Returns `GitError::InvalidName` if `name` is empty, absolute, or
/// contains a path separator or a `.`/`..` component.
pub fn submodule_path(dir: &str, name: &str) -> HubResult<String> {
    let name = name.trim();
    let invalid = |message: &str| GitError::InvalidName {
        name: name.to_string(),
        message: message.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty").into());
    }
    if name == "." || name == ".." {
        return Err(invalid("name cannot be a relative directory").into());
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name cannot contain a path separator").into());
    }

    let dir = dir.trim().trim_end_matches(['/', '\\']);
    if dir.is_empty() {
        Ok(name.to_string())
    } else {
        Ok(format!("{dir}/{name}"))
    }
}
