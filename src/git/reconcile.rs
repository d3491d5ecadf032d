// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule reconciliation.
//!
//! ```text
//! load_submodules(root)
//!   no .git at root ------------------------------> []
//!   read_manifest(root)           [(name, path, url)] in file order
//!   runner.submodule_status(root)
//!     exit 0  --> parse_status(stdout)
//!     else    --> {} (every record uninitialized)
//!   reconcile(manifest, status)   one record per manifest entry
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::manifest::{ManifestEntry, read_manifest};
use super::model::{SubmoduleRecord, SubmoduleStatus};
use super::query::is_hub_repo;
use super::runner::GitRunner;
use super::status::{StatusMap, classify_prefix, parse_status};

/// Combines manifest entries with parsed status output.
///
/// Output follows manifest order. A path missing from `status` is
/// `Uninitialized` with an empty commit.
#[must_use]
pub fn reconcile(entries: &[ManifestEntry], status: &StatusMap) -> Vec<SubmoduleRecord> {
    entries
        .iter()
        .map(|entry| match status.get(&entry.path) {
            Some(live) => SubmoduleRecord::new(
                &entry.name,
                &entry.path,
                &entry.url,
                &live.commit,
                classify_prefix(&live.prefix),
                &live.prefix,
            ),
            None => SubmoduleRecord::new(
                &entry.name,
                &entry.path,
                &entry.url,
                "",
                SubmoduleStatus::Uninitialized,
                "",
            ),
        })
        .collect()
}

/// Builds the current submodule list of the hub at `repo_root`.
///
/// Never fails: a missing repository yields an empty list and a failed
/// status query marks every submodule uninitialized.
pub async fn load_submodules(runner: &GitRunner, repo_root: &Path) -> Vec<SubmoduleRecord> {
    if !is_hub_repo(repo_root) {
        debug!(root = %repo_root.display(), "not a repository, nothing to list");
        return Vec::new();
    }

    let entries = read_manifest(repo_root);
    if entries.is_empty() {
        return Vec::new();
    }

    let result = runner.submodule_status(repo_root).await;
    let status = if result.success() {
        parse_status(result.stdout())
    } else {
        debug!(
            exit_code = result.exit_code(),
            stderr = %result.stderr().trim(),
            "status query failed, treating all submodules as uninitialized"
        );
        StatusMap::new()
    };

    reconcile(&entries, &status)
}

/// Immutable snapshot of one reconciliation pass.
///
/// Cloning shares the records; a refresh replaces the whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct SubmoduleList {
    records: Arc<[SubmoduleRecord]>,
}

impl SubmoduleList {
    /// Loads a fresh snapshot, see [`load_submodules`].
    pub async fn load(runner: &GitRunner, repo_root: &Path) -> Self {
        load_submodules(runner, repo_root).await.into()
    }

    #[must_use]
    pub fn records(&self) -> &[SubmoduleRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SubmoduleRecord> {
        let path = path.trim_end_matches('/');
        self.records.iter().find(|record| record.path() == path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of records per status, omitting statuses with none.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<SubmoduleStatus, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.iter() {
            *counts.entry(record.status()).or_insert(0) += 1;
        }
        counts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubmoduleRecord> {
        self.records.iter()
    }
}

impl From<Vec<SubmoduleRecord>> for SubmoduleList {
    fn from(records: Vec<SubmoduleRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl<'a> IntoIterator for &'a SubmoduleList {
    type Item = &'a SubmoduleRecord;
    type IntoIter = std::slice::Iter<'a, SubmoduleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
