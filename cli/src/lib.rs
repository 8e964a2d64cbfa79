// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of `aimcal-recur`.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::missing_errors_doc, clippy::single_match_else)]

mod arg;
mod cli;
mod cmd_expand;
mod cmd_validate;
mod config;
mod report;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_expand::CmdExpand;
pub use crate::cmd_validate::CmdValidate;
pub use crate::config::{Config, LogConfig};
