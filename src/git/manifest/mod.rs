// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule manifest (`.gitmodules`) parsing.
//!
//! ```text
//! <root>/.gitmodules
//!   [submodule "repos/a"]      --> ManifestEntry { name, path, url, branch }
//!       path = repos/a
//!       url  = https://...
//!   [submodule "broken"]       --> skipped (no url)
//!       path = x
//!   [core]                     --> skipped (not a submodule section)
//! ```
//!
//! Uses the git-config grammar from gix, so quoting, escapes, comments and
//! case-insensitive keys behave exactly like git itself.

use std::path::Path;
use tracing::{debug, warn};

/// Well-known manifest filename at the hub root.
pub const MANIFEST_FILE: &str = ".gitmodules";

/// A submodule declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Section name, the quoted part of `[submodule "<name>"]`.
    pub name: String,
    pub path: String,
    pub url: String,
    /// Branch tracked by remote updates, if declared.
    pub branch: Option<String>,
}

/// Reads `<repo_root>/.gitmodules`.
///
/// A missing, unreadable, non-UTF-8 or malformed manifest yields an empty list.
#[must_use]
pub fn read_manifest(repo_root: &Path) -> Vec<ManifestEntry> {
    let path = repo_root.join(MANIFEST_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no manifest");
        return Vec::new();
    }

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read manifest");
            return Vec::new();
        }
    };
    match String::from_utf8(bytes) {
        Ok(content) => parse_manifest(&content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "manifest is not valid UTF-8, ignoring it");
            Vec::new()
        }
    }
}

/// Parses manifest text into entries, in file order.
///
/// Only `submodule` sections that carry a subsection name and define both
/// `path` and `url` are returned. Values are trimmed.
#[must_use]
pub fn parse_manifest(content: &str) -> Vec<ManifestEntry> {
    let file = match content.parse::<gix::config::File<'static>>() {
        Ok(file) => file,
        Err(e) => {
            warn!(error = %e, "malformed manifest, ignoring it");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for section in file.sections() {
        let header = section.header();
        if !header.name().eq_ignore_ascii_case(b"submodule") {
            continue;
        }
        let Some(name) = header.subsection_name() else {
            continue;
        };

        let value = |key: &str| {
            section
                .value(key)
                .map(|v| v.to_string().trim().to_string())
        };
        let (Some(path), Some(url)) = (value("path"), value("url")) else {
            debug!(submodule = %name, "section without path or url, skipped");
            continue;
        };

        entries.push(ManifestEntry {
            name: name.to_string(),
            path,
            url,
            branch: value("branch").filter(|b| !b.is_empty()),
        });
    }

    entries
}
