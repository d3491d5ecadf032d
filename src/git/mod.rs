// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git submodule core.
//!
//! ```text
//!             load_submodules(root)            executor / runner
//!                      |                               |
//!        +-------------+-------------+                 v
//!        |             |             |          git <args> (cwd=root)
//!        v             v             v                 |
//!    manifest      runner         status               v
//!  .gitmodules  submodule status  parse +         CommandResult
//!   (gix)          (30s)         classify      { stdout, stderr, code }
//!        \             |             /
//!         v            v            v
//!            reconcile (manifest order)
//!                      |
//!                      v
//!              [SubmoduleRecord]
//! ```
//!
//! **Parsing** is pure and never fails; bad input degrades to empty.
//! **Execution** shells out to git and always yields a `CommandResult`.

pub mod executor;
pub mod manifest;
pub mod model;
pub mod ops;
pub mod query;
pub mod reconcile;
pub mod runner;
pub mod status;

#[cfg(test)]
pub(crate) mod test_support;
