// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for subhub.
//!
//! # Config Structure
//!
//! ```text
//! [global]  output_log_level, file_log_level, log_file
//! [git]     program, timeout_secs, status_timeout_secs
//! [hub]     root, submodule_dir
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// How git is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Executable name or path.
    pub program: String,
    /// Timeout for mutating commands, in seconds.
    pub timeout_secs: u64,
    /// Timeout for the status query, in seconds.
    pub status_timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout_secs: 120,
            status_timeout_secs: 30,
        }
    }
}

impl GitConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty program or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(invalid("git", "program", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("git", "timeout_secs", "must be at least 1"));
        }
        if self.status_timeout_secs == 0 {
            return Err(invalid("git", "status_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

/// Which hub repository is managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
    /// Hub root; the current directory when unset.
    pub root: Option<PathBuf>,
    /// Directory new submodules are added under.
    pub submodule_dir: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            root: None,
            submodule_dir: crate::git::ops::DEFAULT_SUBMODULE_DIR.to_string(),
        }
    }
}

impl HubConfig {
    /// Resolved hub root.
    #[must_use]
    pub fn root_or_cwd(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `submodule_dir` is absolute or
    /// escapes the hub.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dir = self.submodule_dir.trim();
        if dir.starts_with(['/', '\\']) || PathBuf::from(dir).is_absolute() {
            return Err(invalid("hub", "submodule_dir", "must be relative to the hub root"));
        }
        if dir.split(['/', '\\']).any(|part| part == "..") {
            return Err(invalid("hub", "submodule_dir", "must stay inside the hub root"));
        }
        Ok(())
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
