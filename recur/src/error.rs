// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::parser::ParseIssue;
use crate::temporal::{Field, Temporal, TemporalKind};
use crate::validate::Violation;

/// Errors raised while building, validating or expanding a recurrence rule.
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecurError {
    /// The validator rejected the rule, expansion did not start
    #[error("Invalid recurrence rule: {}", join_violations(.violations))]
    InvalidRecurrenceSpec {
        /// Every violation whose severity is an error
        violations: Vec<Violation>,
    },

    /// A field operation the temporal kind cannot support
    #[error("Cannot set {field} on a {kind} value")]
    TypeMismatch {
        /// The field that was requested
        field: Field,
        /// The kind of the temporal value
        kind: TemporalKind,
    },

    /// A value that does not fit the field or rule part it targets
    #[error("Invalid value {value} for {field}")]
    InvalidFieldValue {
        /// Name of the field or rule part
        field: &'static str,
        /// The offending value
        value: i32,
    },

    /// Neither COUNT, UNTIL nor a query window bounds the expansion
    #[error("Unbounded expansion: the rule has no COUNT or UNTIL and no window was given")]
    UnboundedExpansion,

    /// A period whose end precedes its start
    #[error("Invalid period: end {end} precedes start {start}")]
    InvalidPeriod {
        /// Start of the period
        start: Temporal,
        /// End of the period
        end: Temporal,
    },

    /// Text that does not follow the iCalendar grammar
    #[error("Failed to parse {what} '{input}': {}", join_issues(.issues))]
    Parse {
        /// What was being parsed
        what: &'static str,
        /// The input text
        input: String,
        /// Parser diagnostics, with byte spans into `input`
        issues: Vec<ParseIssue>,
    },

    /// A TZID that is not in the time zone database
    #[error("Unknown time zone '{name}'")]
    UnknownTimeZone {
        /// The time zone identifier
        name: String,
    },

    /// Calendar arithmetic left the supported range
    #[error("Calendar arithmetic failed: {0}")]
    Calendar(#[from] jiff::Error),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_issues(issues: &[ParseIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
