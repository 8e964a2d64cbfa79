// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Model, validate and expand iCalendar recurrence rules (RFC 5545 RRULE,
//! with the RFC 7529 SKIP part).
//!
//! ```
//! # use aimcal_recur::{ExpandConfig, Recur, Temporal};
//! let rule: Recur = "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1;COUNT=3".parse().unwrap();
//! let seed: Temporal = "20240101T090000".parse().unwrap();
//! let expansion = rule.expand(&seed, None, &ExpandConfig::default()).unwrap();
//! let days: Vec<_> = expansion.occurrences.iter().map(ToString::to_string).collect();
//! assert_eq!(days, ["20240131T090000", "20240229T090000", "20240329T090000"]);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod config;
pub mod engine;
mod error;
mod keyword;
mod parser;
pub mod period;
pub mod recurrence_set;
pub mod rrule;
pub mod temporal;
pub mod transform;
pub mod validate;

pub use crate::config::{ExpandConfig, Strictness};
pub use crate::engine::{Expansion, Termination};
pub use crate::error::RecurError;
pub use crate::parser::{ParseIssue, parse_duration, parse_period, parse_recur, parse_temporal};
pub use crate::period::{Period, RangePosition};
pub use crate::recurrence_set::RecurrenceSet;
pub use crate::rrule::{Frequency, Recur, RecurBound, RecurBuilder, Skip, WeekDay, WeekDayNum};
pub use crate::temporal::{Field, Temporal, TemporalKind};
pub use crate::transform::{Action, RulePart};
pub use crate::validate::{Severity, Violation, validate, validate_with_seed};
