// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use subhub::cli::{Cli, Command};
use subhub::config::loader::ConfigLoader;
use subhub::git::model::SubmoduleStatus;

// =============================================================================
// Commands
// =============================================================================

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["subhub"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_every_command_parses() {
    let cases: &[&[&str]] = &[
        &["subhub", "version"],
        &["subhub", "options"],
        &["subhub", "inis"],
        &["subhub", "list"],
        &["subhub", "ls"],
        &["subhub", "status"],
        &["subhub", "init", "-a"],
        &["subhub", "update", "repos/a"],
        &["subhub", "remote", "repos/a", "repos/b"],
        &["subhub", "add", "https://example.com/a.git", "a"],
        &["subhub", "remove", "repos/a"],
        &["subhub", "rm", "repos/a"],
        &["subhub", "exec", "log"],
    ];
    for args in cases {
        let cli = Cli::try_parse_from(*args);
        assert!(cli.is_ok(), "{args:?}: {}", cli.unwrap_err());
    }
}

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["subhub", "build"]).is_err());
}

#[test]
fn cli_list_status_filter_accepts_keys() {
    for status in SubmoduleStatus::ALL {
        let cli = Cli::try_parse_from(["subhub", "list", "--status", status.as_str()]).unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status, Some(status));
    }
}

#[test]
fn cli_remote_collects_paths() {
    let cli = Cli::try_parse_from(["subhub", "remote", "repos/a", "repos/b"]).unwrap();
    let Some(Command::Remote(args)) = cli.command else {
        panic!("expected remote");
    };
    assert_eq!(args.paths, ["repos/a", "repos/b"]);
}

#[test]
fn cli_exec_keeps_git_flags() {
    let cli = Cli::try_parse_from([
        "subhub",
        "-C",
        "/hub",
        "exec",
        "submodule",
        "foreach",
        "--recursive",
        "git pull",
    ])
    .unwrap();
    let Some(Command::Exec(args)) = cli.command else {
        panic!("expected exec");
    };
    assert!(!args.stream);
    assert_eq!(args.args, ["submodule", "foreach", "--recursive", "git pull"]);
}

// =============================================================================
// Global options into config
// =============================================================================

#[test]
fn cli_overrides_apply_to_config() {
    let cli = Cli::try_parse_from([
        "subhub",
        "--set",
        "hub.root=/ignored",
        "--set",
        "git/timeout_secs=9",
        "-C",
        "/srv/hub",
        "--file-log-level",
        "6",
        "status",
    ])
    .unwrap();

    let mut loader = ConfigLoader::new();
    for option in cli.global.to_config_overrides() {
        loader = loader.set_option(&option).unwrap();
    }
    let config = loader.build().unwrap();

    assert_eq!(config.hub.root.as_deref(), Some(std::path::Path::new("/srv/hub")));
    assert_eq!(config.git.timeout_secs, 9);
    assert_eq!(config.global.file_log_level.as_u8(), 6);
    assert_eq!(config.global.output_log_level.as_u8(), 2);
}

#[test]
fn cli_help_lists_commands() {
    let err = Cli::try_parse_from(["subhub", "--help"]).unwrap_err();
    let help = err.to_string();
    for command in ["list", "status", "init", "update", "remote", "add", "remove", "exec"] {
        assert!(help.contains(command), "help is missing '{command}'");
    }
}
