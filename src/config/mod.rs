// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for subhub.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. subhub.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. SUBHUB_* env vars
//! 5. --set section.key=value
//! 6. dedicated CLI flags (-l, --log-file, -C, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SUBHUB_GIT__PROGRAM=/opt/git/bin/git  → git.program
//! SUBHUB_GIT__TIMEOUT_SECS=300          → git.timeout_secs
//! SUBHUB_HUB__SUBMODULE_DIR=vendor      → hub.submodule_dir
//! ```
//!
//! Sections and keys are separated by a double underscore since keys
//! themselves contain single underscores.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, HubConfig};

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "subhub.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "SUBHUB";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Git invocation.
    pub git: GitConfig,
    /// Hub location and layout.
    pub hub: HubConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use subhub::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("subhub.toml")
    ///     .with_env_prefix("SUBHUB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        self.hub.validate()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// One `key = value` line per option, sorted by key, aligned on `=`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);
        self.format_hub_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("git.program".into(), self.git.program.clone());
        options.insert(
            "git.timeout_secs".into(),
            self.git.timeout_secs.to_string(),
        );
        options.insert(
            "git.status_timeout_secs".into(),
            self.git.status_timeout_secs.to_string(),
        );
    }

    fn format_hub_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "hub.root".into(),
            self.hub
                .root
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("hub.submodule_dir".into(), self.hub.submodule_dir.clone());
    }
}
