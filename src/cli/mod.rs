// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for subhub using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! subhub [global options] <command>
//! list | status
//! init | update | remote | add | remove
//! exec -- ARGS
//! options | inis | version
//! ```

pub mod global;
pub mod submodule;


use crate::cli::global::GlobalOptions;
use crate::cli::submodule::{AddArgs, ExecArgs, InitArgs, ListArgs, PathsArgs};
use clap::{Parser, Subcommand};

/// Submodule manager for git hub repositories
#[derive(Debug, Parser)]
#[command(
    name = "subhub",
    author,
    version,
    about = "Submodule manager for git hub repositories",
    long_about = "subhub Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Lists, initializes, updates, adds and removes the submodules\n\
                  of a hub repository by driving the installed git.\n\n\
                  Run `subhub list` inside the hub, or point at it with `-C DIR`.\n\
                  See `subhub <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  subhub reads `subhub.toml` from the current directory if it\n\
                  exists. Additional files can be given with --ini and are loaded\n\
                  after it. SUBHUB_<SECTION>__<KEY> environment variables come\n\
                  next, then --set options, then dedicated flags such as -C."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used.
    Inis,

    /// Lists submodules with their state.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Shows raw `git submodule status` output.
    Status,

    /// Initializes and checks out submodules recursively.
    Init(InitArgs),

    /// Checks out the commits recorded in the hub.
    Update(PathsArgs),

    /// Updates submodules to their remote-tracking branch.
    Remote(PathsArgs),

    /// Adds a new submodule.
    Add(AddArgs),

    /// Deinitializes and removes submodules.
    #[command(visible_alias = "rm")]
    Remove(PathsArgs),

    /// Runs an arbitrary git command in the hub.
    Exec(ExecArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
