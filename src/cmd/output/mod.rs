// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text rendering for command logs and submodule tables.
//!
//! ```text
//! $ git submodule update --remote repos/a     render_completion
//! <stdout>
//! <stderr>
//! [exit 0]
//!
//! PATH     STATUS           COMMIT   URL      render_table
//! repos/a  initialized      1a2b3c4  https://...
//! ```

use std::fmt::Write as _;

use crate::error::Result;
use crate::git::executor::Completion;
use crate::git::model::{SubmoduleRecord, SubmoduleStatus};
use crate::git::reconcile::SubmoduleList;

/// Characters of a commit hash shown in tables.
pub const SHORT_COMMIT_LEN: usize = 7;

/// Renders one finished command the way it is echoed to the user.
#[must_use]
pub fn render_completion(completion: &Completion) -> String {
    let mut out = format!("$ {}\n", completion.command_line);
    for text in [completion.result.stdout(), completion.result.stderr()] {
        let text = text.trim_end();
        if !text.is_empty() {
            out.push_str(text);
            out.push('\n');
        }
    }
    let _ = writeln!(out, "[exit {}]", completion.result.exit_code());
    out
}

/// Renders records as an aligned table, one row per submodule.
#[must_use]
pub fn render_table(records: &[SubmoduleRecord]) -> String {
    let header: [&str; 4] = ["PATH", "STATUS", "COMMIT", "URL"];
    let rows: Vec<[&str; 4]> = records
        .iter()
        .map(|record| {
            let commit = match record.short_commit(SHORT_COMMIT_LEN) {
                "" => "-",
                commit => commit,
            };
            [record.path(), record.status().label(), commit, record.url()]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let [path, status, commit, url] = row;
        let _ = writeln!(
            out,
            "{path:<pw$}  {status:<sw$}  {commit:<cw$}  {url}",
            pw = widths[0],
            sw = widths[1],
            cw = widths[2],
        );
    }
    out
}

/// One-line summary such as `3 submodules: 1 not initialized, 2 initialized`.
#[must_use]
pub fn render_counts(list: &SubmoduleList) -> String {
    let noun = if list.len() == 1 { "submodule" } else { "submodules" };
    let counts: Vec<String> = list
        .counts()
        .into_iter()
        .map(|(status, n)| format!("{n} {}", status.label()))
        .collect();
    if counts.is_empty() {
        format!("0 {noun}")
    } else {
        format!("{} {noun}: {}", list.len(), counts.join(", "))
    }
}

/// Records as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[SubmoduleRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Keeps records in `status`, or all of them when `None`.
#[must_use]
pub fn filter_status(
    records: &[SubmoduleRecord],
    status: Option<SubmoduleStatus>,
) -> Vec<SubmoduleRecord> {
    records
        .iter()
        .filter(|record| status.is_none_or(|s| record.status() == s))
        .cloned()
        .collect()
}
