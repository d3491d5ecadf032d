// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let lines: Vec<_> = Config::default()
        .format_options()
        .iter()
        .map(|line| line.trim_end().to_string())
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    git.program             = git
    git.status_timeout_secs = 30
    git.timeout_secs        = 120
    global.file_log_level   = 4
    global.log_file         =
    global.output_log_level = 2
    hub.root                =
    hub.submodule_dir       = repos
    ");
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(Config::parse("").unwrap(), Config::default());
}

#[test]
fn test_parse_all_sections() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 3
log_file = "subhub.log"

[git]
program = "/opt/git/bin/git"
timeout_secs = 300

[hub]
root = "/srv/hub"
submodule_dir = "vendor"
"#,
    )
    .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("subhub.log")));
    assert_eq!(config.git.program, "/opt/git/bin/git");
    assert_eq!(config.git.timeout_secs, 300);
    assert_eq!(config.git.status_timeout_secs, 30);
    assert_eq!(config.hub.root, Some(PathBuf::from("/srv/hub")));
    assert_eq!(config.hub.submodule_dir, "vendor");
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(Config::parse("[git]\nprogramm = \"git\"\n").is_err());
    assert!(Config::parse("[paths]\nprefix = \"x\"\n").is_err());
}

#[test]
fn test_log_level_out_of_range_is_rejected() {
    assert!(Config::parse("[global]\noutput_log_level = 7\n").is_err());
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        "[git]\ntimeout_secs = 0\n",
        "[git]\nstatus_timeout_secs = 0\n",
        "[git]\nprogram = \"  \"\n",
        "[hub]\nsubmodule_dir = \"/abs\"\n",
        "[hub]\nsubmodule_dir = \"../outside\"\n",
    ];
    for case in cases {
        assert!(Config::parse(case).is_err(), "accepted: {case}");
    }

    let err = Config::parse("[git]\ntimeout_secs = 0\n").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'timeout_secs' in section '[git]': must be at least 1");
}

#[test]
fn test_later_files_override_earlier() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&base, "[git]\ntimeout_secs = 10\nstatus_timeout_secs = 5\n").unwrap();
    std::fs::write(&local, "[git]\ntimeout_secs = 20\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();
    assert_eq!(config.git.timeout_secs, 20);
    assert_eq!(config.git.status_timeout_secs, 5);
}

#[test]
fn test_missing_required_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(dir.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_optional_file_only_listed_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("subhub.toml");
    std::fs::write(&present, "[hub]\nsubmodule_dir = \"mods\"\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(dir.path().join("absent.toml"))
        .add_toml_file_optional(&present);
    assert_eq!(loader.loaded_files().len(), 1);
    assert!(loader.format_loaded_files()[0].starts_with("1. [optional] "));
    assert_eq!(loader.build().unwrap().hub.submodule_dir, "mods");
}

#[test]
fn test_env_vars_override_files() {
    let config = ConfigLoader::new()
        .add_toml_str("[git]\ntimeout_secs = 10\nprogram = \"git\"\n")
        .with_env_prefix("SUBHUB")
        .with_env_vars([
            ("SUBHUB_GIT__TIMEOUT_SECS", "45"),
            ("SUBHUB_HUB__SUBMODULE_DIR", "vendor"),
            ("OTHER_GIT__PROGRAM", "ignored"),
        ])
        .build()
        .unwrap();

    assert_eq!(config.git.timeout_secs, 45);
    assert_eq!(config.git.program, "git");
    assert_eq!(config.hub.submodule_dir, "vendor");
}

#[test]
fn test_set_option_has_highest_priority() {
    let config = ConfigLoader::new()
        .add_toml_str("[git]\ntimeout_secs = 10\n")
        .with_env_prefix("SUBHUB")
        .with_env_vars([("SUBHUB_GIT__TIMEOUT_SECS", "45")])
        .set_option("git.timeout_secs=99")
        .unwrap()
        .set_option("hub/submodule_dir = mods")
        .unwrap()
        .set_option("global.output_log_level=4")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.git.timeout_secs, 99);
    assert_eq!(config.hub.submodule_dir, "mods");
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
}

#[test]
fn test_set_option_rejects_malformed() {
    for bad in ["timeout_secs", "timeout_secs=1", ".x=1", "git.=1"] {
        assert!(ConfigLoader::new().set_option(bad).is_err(), "accepted: {bad}");
    }
}

#[test]
fn test_root_or_cwd() {
    let mut config = Config::default();
    assert_eq!(config.hub.root_or_cwd(), PathBuf::from("."));
    config.hub.root = Some(PathBuf::from("/srv/hub"));
    assert_eq!(config.hub.root_or_cwd(), PathBuf::from("/srv/hub"));
}

#[test]
fn test_serialized_log_levels_are_numbers() {
    let json = serde_json::to_value(Config::default()).unwrap();
    assert_eq!(json["global"]["output_log_level"], 2);
    assert_eq!(json["git"]["timeout_secs"], 120);
}
