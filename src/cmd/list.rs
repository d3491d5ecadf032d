// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for subhub.

use tracing::{debug, warn};

use crate::cli::submodule::ListArgs;
use crate::cmd::output::{filter_status, render_counts, render_json, render_table};
use crate::cmd::submodule::Hub;
use crate::error::Result;
use crate::git::query::{current_branch, is_hub_repo};
use crate::git::reconcile::SubmoduleList;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run_list_command(args: &ListArgs, hub: &Hub) -> Result<()> {
    if !is_hub_repo(hub.root()) {
        warn!(root = %hub.root().display(), "not a git repository, no submodules to list");
    }

    let list = hub.list().await;
    let records = filter_status(list.records(), args.status);

    if args.json {
        println!("{}", render_json(&records)?);
        return Ok(());
    }

    let branch = match current_branch(hub.root()) {
        Ok(Some(branch)) => branch,
        Ok(None) => "(detached)".to_string(),
        Err(e) => {
            debug!(error = %e, "could not read hub branch");
            "(unknown)".to_string()
        }
    };
    println!("Hub: {} [{branch}]", hub.root().display());

    if records.is_empty() {
        println!("No submodules found");
    } else {
        print!("{}", render_table(&records));
    }
    println!("{}", render_counts(&SubmoduleList::from(records)));
    Ok(())
}
