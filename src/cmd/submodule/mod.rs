// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule command implementations.
//!
//! ```text
//! handler --> Hub::select (paths vs manifest)
//!         --> Hub::run_batch (CommandSlot, one command at a time)
//!               echo "$ git ..." / output / [exit N] per command
//!         --> Hub::finish (refreshed table, CommandFailed if any failed)
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cli::submodule::{AddArgs, ExecArgs, InitArgs, PathsArgs};
use crate::cmd::output::{render_completion, render_counts, render_table};
use crate::config::Config;
use crate::error::{GitError, HubError, Result};
use crate::git::executor::{CommandExecutor, CommandRequest, CommandSlot, Completion};
use crate::git::ops;
use crate::git::query::is_hub_repo;
use crate::git::reconcile::SubmoduleList;
use crate::git::runner::GitRunner;

/// The hub repository a command operates on.
#[derive(Debug, Clone)]
pub struct Hub {
    root: PathBuf,
    runner: GitRunner,
    submodule_dir: String,
    refresh: bool,
}

impl Hub {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, runner: GitRunner) -> Self {
        Self {
            root: root.into(),
            runner,
            submodule_dir: ops::DEFAULT_SUBMODULE_DIR.to_string(),
            refresh: true,
        }
    }

    /// Builds the hub from `[hub]` and `[git]`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.hub.root_or_cwd(), GitRunner::from_config(&config.git))
            .with_submodule_dir(&config.hub.submodule_dir)
    }

    #[must_use]
    pub fn with_submodule_dir(mut self, dir: &str) -> Self {
        self.submodule_dir = dir.to_string();
        self
    }

    /// Controls whether mutating commands print the refreshed list.
    #[must_use]
    pub const fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn runner(&self) -> &GitRunner {
        &self.runner
    }

    #[must_use]
    pub fn submodule_dir(&self) -> &str {
        &self.submodule_dir
    }

    pub async fn list(&self) -> SubmoduleList {
        SubmoduleList::load(&self.runner, &self.root).await
    }

    fn ensure_repo(&self) -> Result<()> {
        if is_hub_repo(&self.root) {
            Ok(())
        } else {
            Err(HubError::from(GitError::NotARepository {
                path: self.root.display().to_string(),
            })
            .into())
        }
    }

    /// Checks a path selection against the current manifest.
    ///
    /// Unknown paths are warned about and kept.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NothingSelected` if `paths` is empty.
    pub async fn select(&self, action: &str, paths: &[String]) -> Result<Vec<String>> {
        if paths.is_empty() {
            return Err(HubError::from(GitError::NothingSelected {
                action: action.to_string(),
            })
            .into());
        }

        let list = self.list().await;
        for path in paths {
            if !list.contains(path) {
                warn!(path = %path, action, "not a submodule in the manifest, passing it to git anyway");
            }
        }
        Ok(paths.to_vec())
    }

    /// Runs `batch` in order, echoing each command as it completes.
    ///
    /// Ctrl+C cancels the running command; the rest of the batch then
    /// completes with launch failures.
    ///
    /// # Errors
    ///
    /// Returns an error outside a tokio runtime.
    pub async fn run_batch(&self, batch: Vec<Vec<String>>) -> Result<Vec<Completion>> {
        let executor = CommandExecutor::current(self.runner.clone())?;

        let interrupt = executor.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Received Ctrl+C, cancelling git commands...");
                interrupt.shutdown();
            }
        });

        let requests = batch
            .into_iter()
            .map(|args| CommandRequest::new(&self.root, args));
        let mut slot = CommandSlot::new(executor);
        let completions = slot
            .run_sequence_with(requests, |completion| {
                print!("{}", render_completion(completion));
            })
            .await;
        ctrl_c.abort();

        Ok(completions?)
    }

    /// Prints the refreshed list and turns failed commands into an error.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if any completion is not a success.
    pub async fn finish(&self, completions: &[Completion]) -> Result<()> {
        if self.refresh {
            let list = self.list().await;
            println!();
            print!("{}", render_table(list.records()));
            println!("{}", render_counts(&list));
        }
        check_completions(completions)
    }
}

/// Fails with `GitError::CommandFailed` when any command failed.
///
/// # Errors
///
/// See above.
pub fn check_completions(completions: &[Completion]) -> Result<()> {
    let failed = completions
        .iter()
        .filter(|completion| !completion.result.success())
        .count();
    if failed == 0 {
        Ok(())
    } else {
        Err(HubError::from(GitError::CommandFailed {
            failed,
            total: completions.len(),
        })
        .into())
    }
}

/// How to record remote updates in the hub.
#[must_use]
pub fn remote_reminder(paths: &[String]) -> String {
    format!(
        "Updated to the remote branch. To record the new commits in the hub run:\n  \
         git add {}\n  \
         git commit -m \"chore: update submodules\"",
        paths.join(" ")
    )
}

/// Runs the `status` command.
///
/// # Errors
///
/// Returns an error if the status query fails.
pub async fn run_status_command(hub: &Hub) -> Result<()> {
    let completions = hub.run_batch(vec![ops::status_args()]).await?;
    check_completions(&completions)
}

/// Runs the `init` command.
///
/// # Errors
///
/// Returns an error if nothing is selected, the hub is not a repository or
/// the command fails.
pub async fn run_init_command(args: &InitArgs, hub: &Hub) -> Result<()> {
    hub.ensure_repo()?;
    let paths = if args.all {
        Vec::new()
    } else {
        hub.select("init", &args.paths).await?
    };
    info!(paths = ?paths, all = args.all, "initializing submodules");

    let completions = hub.run_batch(vec![ops::init_update_args(&paths)]).await?;
    hub.finish(&completions).await
}

/// Runs the `update` command.
///
/// # Errors
///
/// Returns an error if nothing is selected, the hub is not a repository or
/// the command fails.
pub async fn run_update_command(args: &PathsArgs, hub: &Hub) -> Result<()> {
    hub.ensure_repo()?;
    let paths = hub.select("update", &args.paths).await?;
    let completions = hub.run_batch(vec![ops::init_update_args(&paths)]).await?;
    hub.finish(&completions).await
}

/// Runs the `remote` command, one update per path.
///
/// # Errors
///
/// Returns an error if nothing is selected, the hub is not a repository or
/// any per-path command fails.
pub async fn run_remote_command(args: &PathsArgs, hub: &Hub) -> Result<()> {
    hub.ensure_repo()?;
    let paths = hub.select("remote", &args.paths).await?;
    let batch = paths.iter().map(|path| ops::remote_update_args(path)).collect();

    let completions = hub.run_batch(batch).await?;
    if completions.iter().all(|completion| completion.result.success()) {
        println!();
        println!("{}", remote_reminder(&paths));
    }
    hub.finish(&completions).await
}

/// Runs the `add` command.
///
/// # Errors
///
/// Returns an error if the name is invalid, the hub is not a repository or
/// the command fails.
pub async fn run_add_command(args: &AddArgs, hub: &Hub) -> Result<()> {
    hub.ensure_repo()?;
    let path = match &args.path {
        Some(path) => path.clone(),
        None => ops::submodule_path(hub.submodule_dir(), &args.name)?,
    };
    info!(url = %args.url, path = %path, "adding submodule");

    let completions = hub.run_batch(vec![ops::add_args(&args.url, &path)]).await?;
    hub.finish(&completions).await
}

/// Runs the `remove` command: deinit then rm for every path.
///
/// # Errors
///
/// Returns an error if nothing is selected, the hub is not a repository or
/// any step fails.
pub async fn run_remove_command(args: &PathsArgs, hub: &Hub) -> Result<()> {
    hub.ensure_repo()?;
    let paths = hub.select("remove", &args.paths).await?;
    let batch = paths
        .iter()
        .flat_map(|path| ops::removal_sequence(path))
        .collect();

    let completions = hub.run_batch(batch).await?;
    println!();
    println!("Commit the hub to record the removal.");
    hub.finish(&completions).await
}

/// Runs the `exec` command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn run_exec_command(args: &ExecArgs, hub: &Hub) -> Result<()> {
    if !args.stream {
        let completions = hub.run_batch(vec![args.args.clone()]).await?;
        return check_completions(&completions);
    }

    let completion = stream_exec(hub, &args.args, &mut std::io::stdout()).await?;
    check_completions(std::slice::from_ref(&completion))
}

/// Runs one git command, writing each output line to `out` as it arrives.
async fn stream_exec<W: Write>(hub: &Hub, args: &[String], out: &mut W) -> Result<Completion> {
    let executor = CommandExecutor::current(hub.runner().clone())?;
    let (pending, lines) = executor.submit_streaming(CommandRequest::new(hub.root(), args));
    writeln!(out, "$ {}", pending.command_line())?;
    while let Ok(line) = lines.recv_async().await {
        writeln!(out, "{}", line.text)?;
    }

    let completion = pending.wait().await;
    if completion.result.is_launch_failure() {
        writeln!(out, "{}", completion.result.stderr().trim_end())?;
    }
    writeln!(out, "[exit {}]", completion.result.exit_code())?;
    Ok(completion)
}
