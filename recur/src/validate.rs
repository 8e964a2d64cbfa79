// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Checks a rule against RFC 5545 before it is expanded.
//!
//! Validation never fails. It lists every problem it finds, and the caller's
//! [`Strictness`] decides which of them refuse the rule.

use strum::IntoEnumIterator;

use crate::config::Strictness;
use crate::rrule::{Frequency, Recur, WeekDayNum};
use crate::temporal::{Temporal, TemporalKind};
use crate::transform::{Action, RulePart, action};

/// A way a rule breaks RFC 5545.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The rule part must not be used with this frequency
    #[error("{part} is not applicable to FREQ={freq}")]
    NotApplicable {
        /// The offending rule part
        part: RulePart,
        /// The rule frequency
        freq: Frequency,
    },

    /// A numbered BYDAY entry where only plain weekdays are allowed
    #[error("BYDAY={day} cannot have an ordinal with FREQ={freq}")]
    OrdinalNotAllowed {
        /// The offending entry
        day: WeekDayNum,
        /// The rule frequency
        freq: Frequency,
    },

    /// A value outside the range RFC 5545 gives for its rule part
    #[error("{value} is out of range for {part}")]
    OutOfRange {
        /// The rule part
        part: RulePart,
        /// The offending value, the ordinal for BYDAY
        value: i32,
    },

    /// INTERVAL=0
    #[error("INTERVAL must be a positive integer")]
    ZeroInterval,

    /// UNTIL is not of the kind DTSTART asks for
    #[error("UNTIL is a {until} but DTSTART is a {seed}")]
    UntilKindMismatch {
        /// Kind of the UNTIL value
        until: TemporalKind,
        /// Kind of the seed
        seed: TemporalKind,
    },
}

/// Whether a violation refuses the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[expect(missing_docs)]
pub enum Severity {
    Error,
    Warning,
}

impl Violation {
    /// The severity under `strictness`.
    ///
    /// Only [`Strictness::Strict`] refuses out of range values, ordinals and
    /// UNTIL kinds, which the engine can skip or compare loosely. Relaxed
    /// also lets inapplicable parts and a zero interval through.
    #[must_use]
    pub const fn severity(&self, strictness: Strictness) -> Severity {
        match (self, strictness) {
            (_, Strictness::Strict) => Severity::Error,
            (Violation::NotApplicable { .. } | Violation::ZeroInterval, Strictness::Lenient) => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }
}

/// Check `rule` on its own.
#[must_use]
pub fn validate(rule: &Recur) -> Vec<Violation> {
    let mut violations = Vec::new();

    if rule.interval == 0 {
        violations.push(Violation::ZeroInterval);
    }

    for part in RulePart::iter().filter(|p| p.is_set(rule)) {
        if action(part, rule.freq) == Action::NotApplicable {
            violations.push(Violation::NotApplicable {
                part,
                freq: rule.freq,
            });
        }
    }

    check_range(&mut violations, RulePart::BySecond, &rule.by_second);
    check_range(&mut violations, RulePart::ByMinute, &rule.by_minute);
    check_range(&mut violations, RulePart::ByHour, &rule.by_hour);
    check_range(&mut violations, RulePart::ByMonthDay, &rule.by_month_day);
    check_range(&mut violations, RulePart::ByYearDay, &rule.by_year_day);
    check_range(&mut violations, RulePart::ByWeekNo, &rule.by_week_no);
    check_range(&mut violations, RulePart::ByMonth, &rule.by_month);
    check_range(&mut violations, RulePart::BySetPos, &rule.by_set_pos);

    let ordinals_allowed = match rule.freq {
        Frequency::Monthly => true,
        Frequency::Yearly => rule.by_week_no.is_empty(),
        _ => false,
    };
    for day in &rule.by_day {
        let Some(n) = day.occurrence else { continue };
        if !RulePart::ByDay.accepts(i32::from(n)) {
            violations.push(Violation::OutOfRange {
                part: RulePart::ByDay,
                value: i32::from(n),
            });
        } else if !ordinals_allowed {
            violations.push(Violation::OrdinalNotAllowed {
                day: *day,
                freq: rule.freq,
            });
        }
    }

    violations
}

/// Check `rule` as the recurrence of `seed`, which adds the UNTIL kind rule
/// of RFC 5545 Section 3.3.10: a DATE seed takes a DATE UNTIL, a floating seed
/// a floating UNTIL and any other seed a UTC UNTIL.
#[must_use]
pub fn validate_with_seed(rule: &Recur, seed: &Temporal) -> Vec<Violation> {
    let mut violations = validate(rule);
    if let Some(until) = rule.until() {
        let ok = match seed.kind() {
            TemporalKind::Date => until.is_date(),
            TemporalKind::Floating => until.kind() == TemporalKind::Floating,
            TemporalKind::Utc | TemporalKind::Zoned => until.kind() == TemporalKind::Utc,
        };
        if !ok {
            violations.push(Violation::UntilKindMismatch {
                until: until.kind(),
                seed: seed.kind(),
            });
        }
    }
    violations
}

fn check_range<T>(violations: &mut Vec<Violation>, part: RulePart, values: &[T])
where
    T: Copy + Into<i32>,
{
    violations.extend(
        values
            .iter()
            .map(|v| (*v).into())
            .filter(|v| !part.accepts(*v))
            .map(|value| Violation::OutOfRange { part, value }),
    );
}
