// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::Path;

use subhub::config::loader::ConfigLoader;
use subhub::config::{Config, ENV_PREFIX};
use subhub::git::runner::GitRunner;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 3
file_log_level = 5
log_file = "logs/subhub.log"

[git]
program = "/opt/git/bin/git"
timeout_secs = 600
status_timeout_secs = 10

[hub]
root = "/srv/hub"
submodule_dir = "vendor"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level.as_u8(), 3);
    assert_eq!(config.global.log_file.as_deref(), Some(Path::new("logs/subhub.log")));
    assert_eq!(config.git.program, "/opt/git/bin/git");
    assert_eq!(config.hub.root_or_cwd(), Path::new("/srv/hub"));
    assert_eq!(config.hub.submodule_dir, "vendor");

    let runner = GitRunner::from_config(&config.git);
    assert_eq!(runner.default_timeout().as_secs(), 600);
    assert_eq!(runner.status_timeout().as_secs(), 10);
}

#[test]
fn config_rejects_unknown_section_key() {
    assert!(Config::parse("[hub]\nsubmodules = \"x\"\n").is_err());
}

#[test]
fn config_rejects_escaping_submodule_dir() {
    let err = Config::parse("[hub]\nsubmodule_dir = \"../elsewhere\"\n").unwrap_err();
    assert!(err.to_string().contains("submodule_dir"), "{err}");
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_layers_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("subhub.toml");
    let extra = dir.path().join("extra.toml");
    std::fs::write(&base, "[git]\ntimeout_secs = 10\nstatus_timeout_secs = 11\n").unwrap();
    std::fs::write(&extra, "[git]\ntimeout_secs = 20\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file_optional(&base)
        .add_toml_file(&extra)
        .with_env_prefix(ENV_PREFIX)
        .with_env_vars([("SUBHUB_GIT__STATUS_TIMEOUT_SECS", "12")])
        .build()
        .unwrap();

    assert_eq!(config.git.timeout_secs, 20);
    assert_eq!(config.git.status_timeout_secs, 12);
}

#[test]
fn config_set_option_beats_env() {
    let config = ConfigLoader::new()
        .with_env_prefix(ENV_PREFIX)
        .with_env_vars([("SUBHUB_HUB__SUBMODULE_DIR", "from-env")])
        .set_option("hub.submodule_dir=from-set")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.hub.submodule_dir, "from-set");
}

#[test]
fn config_missing_optional_file_is_not_listed() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new().add_toml_file_optional(dir.path().join("subhub.toml"));
    assert!(loader.format_loaded_files().is_empty());
    assert_eq!(loader.build().unwrap(), Config::default());
}
