// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule command arguments.
//!
//! ```text
//! list [--json] [--status S]   reconciled table
//! init [PATHS..] [--all]       submodule update --init --recursive
//! update PATHS..               same command, selected paths
//! remote PATHS..               submodule update --remote, one per path
//! add URL NAME [--path P]      submodule add
//! remove PATHS..               deinit -f, then rm -f, per path
//! exec [--stream] -- ARGS..    any git command
//! ```

use clap::Args;

use crate::git::model::SubmoduleStatus;

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Prints records as JSON.
    #[arg(long)]
    pub json: bool,

    /// Only shows submodules in this state (e.g. uninitialized, ahead).
    #[arg(long, value_name = "STATUS")]
    pub status: Option<SubmoduleStatus>,
}

/// Submodule paths to act on.
#[derive(Debug, Clone, Default, Args)]
pub struct PathsArgs {
    /// Submodule paths, as listed by `subhub list`.
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Submodule paths to initialize.
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Initializes every submodule.
    #[arg(short, long, conflicts_with = "paths")]
    pub all: bool,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Repository URL of the new submodule.
    pub url: String,

    /// Submodule name; it is checked out at `<hub.submodule_dir>/<NAME>`.
    pub name: String,

    /// Explicit path instead of `<hub.submodule_dir>/<NAME>`.
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, Args)]
pub struct ExecArgs {
    /// Prints output lines as they arrive.
    #[arg(long)]
    pub stream: bool,

    /// Arguments passed to git.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}
