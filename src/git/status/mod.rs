// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git submodule status` output parsing and prefix classification.
//!
//! ```text
//! line   := [prefix] commit WS path [ WS "(" description ")" ]
//! prefix := "-" | "+" | "U" | " "
//!
//! "-0000000 repos/x"              --> repos/x => (0000000, "-")
//! " abcdef1 repos/y (heads/main)" --> repos/y => (abcdef1, "")
//! "+1234567 repos/z"              --> repos/z => (1234567, "+")
//! ```

use std::collections::BTreeMap;

use super::model::SubmoduleStatus;

/// Characters git prints in front of the commit hash.
const PREFIX_CHARS: [char; 4] = ['-', '+', 'U', ' '];

/// Commit and prefix reported for one submodule path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub commit: String,
    /// The prefix character, or empty for a clean submodule.
    pub prefix: String,
}

/// Path -> status entry, one per reported submodule.
pub type StatusMap = BTreeMap<String, StatusEntry>;

/// Parses `git submodule status` stdout.
///
/// Blank lines and lines without both a commit and a path are skipped.
/// A repeated path keeps its last occurrence.
#[must_use]
pub fn parse_status(stdout: &str) -> StatusMap {
    stdout.trim().lines().filter_map(parse_status_line).collect()
}

/// Parses one status line into `(path, entry)`.
#[must_use]
pub fn parse_status_line(line: &str) -> Option<(String, StatusEntry)> {
    let line = line.trim();
    let first = line.chars().next()?;

    let (prefix, rest) = if PREFIX_CHARS.contains(&first) {
        let prefix = if first == ' ' {
            String::new()
        } else {
            first.to_string()
        };
        (prefix, line[first.len_utf8()..].trim_start())
    } else {
        (String::new(), line)
    };

    let (commit, rest) = rest.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if commit.is_empty() || rest.is_empty() {
        return None;
    }

    let path = rest.split_once('(').map_or(rest, |(path, _)| path).trim();

    Some((
        path.to_string(),
        StatusEntry {
            commit: commit.to_string(),
            prefix,
        },
    ))
}

/// Maps a status prefix to a submodule state.
///
/// Unknown prefixes fall back to `Initialized`.
#[must_use]
pub fn classify_prefix(prefix: &str) -> SubmoduleStatus {
    match prefix {
        "-" => SubmoduleStatus::Uninitialized,
        "+" => SubmoduleStatus::Ahead,
        "U" => SubmoduleStatus::MergeConflict,
        _ => SubmoduleStatus::Initialized,
    }
}
