// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config: options, inis
//!   list
//!   submodule: status, init, update, remote, add, remove, exec
//!   output: text/JSON rendering shared by the handlers
//! ```

pub mod config;
pub mod list;
pub mod output;
pub mod submodule;
