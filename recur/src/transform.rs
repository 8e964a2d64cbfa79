// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Per rule part transformers and the table that says whether each part
//! expands or limits the candidates of a frequency.
//!
//! RFC 5545 Section 3.3.10 fixes that table. It is kept here as data, and the
//! engine builds its pipeline from it instead of branching per frequency.

mod by_day;
mod by_month;
mod by_month_day;
mod by_set_pos;
mod by_time;
mod by_week_no;
mod by_year_day;

use std::fmt;

use jiff::ToSpan;
use jiff::civil::Date;
use strum::IntoEnumIterator;

use crate::config::Strictness;
use crate::error::RecurError;
use crate::rrule::{Frequency, Recur};
use crate::temporal::{Field, Temporal};

pub(crate) use crate::transform::by_set_pos::BySetPos;

/// Rule parts that transform candidates, in the order they are applied.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum RulePart {
    /// BYMONTH
    #[strum(serialize = "BYMONTH")]
    ByMonth,
    /// BYWEEKNO
    #[strum(serialize = "BYWEEKNO")]
    ByWeekNo,
    /// BYYEARDAY
    #[strum(serialize = "BYYEARDAY")]
    ByYearDay,
    /// BYMONTHDAY
    #[strum(serialize = "BYMONTHDAY")]
    ByMonthDay,
    /// BYDAY
    #[strum(serialize = "BYDAY")]
    ByDay,
    /// BYHOUR
    #[strum(serialize = "BYHOUR")]
    ByHour,
    /// BYMINUTE
    #[strum(serialize = "BYMINUTE")]
    ByMinute,
    /// BYSECOND
    #[strum(serialize = "BYSECOND")]
    BySecond,
    /// BYSETPOS
    #[strum(serialize = "BYSETPOS")]
    BySetPos,
}

impl RulePart {
    /// Whether `rule` sets this part.
    #[must_use]
    pub fn is_set(self, rule: &Recur) -> bool {
        match self {
            RulePart::ByMonth => !rule.by_month.is_empty(),
            RulePart::ByWeekNo => !rule.by_week_no.is_empty(),
            RulePart::ByYearDay => !rule.by_year_day.is_empty(),
            RulePart::ByMonthDay => !rule.by_month_day.is_empty(),
            RulePart::ByDay => !rule.by_day.is_empty(),
            RulePart::ByHour => !rule.by_hour.is_empty(),
            RulePart::ByMinute => !rule.by_minute.is_empty(),
            RulePart::BySecond => !rule.by_second.is_empty(),
            RulePart::BySetPos => !rule.by_set_pos.is_empty(),
        }
    }

    /// Whether the part works on the time of day rather than the date.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(
            self,
            RulePart::ByHour | RulePart::ByMinute | RulePart::BySecond
        )
    }

    /// The inclusive range of valid values. Parts marked signed also accept
    /// the negated range.
    #[must_use]
    pub const fn valid_range(self) -> (i32, i32, bool) {
        match self {
            RulePart::ByMonth => (1, 12, false),
            RulePart::ByWeekNo => (1, 53, true),
            RulePart::ByYearDay | RulePart::BySetPos => (1, 366, true),
            RulePart::ByMonthDay => (1, 31, true),
            // range of the ordinal
            RulePart::ByDay => (1, 53, true),
            RulePart::ByHour => (0, 23, false),
            RulePart::ByMinute => (0, 59, false),
            RulePart::BySecond => (0, 60, false),
        }
    }

    /// Whether `value` lies in the RFC 5545 range of this part.
    #[must_use]
    pub const fn accepts(self, value: i32) -> bool {
        let (min, max, signed) = self.valid_range();
        (value >= min && value <= max) || (signed && value <= -min && value >= -max)
    }
}

/// What a rule part does to the candidates of one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep the candidates whose field is in the set
    Limit,
    /// Produce one candidate per value
    Expand,
    /// Limit or expand depending on the other parts of the rule
    Special,
    /// The part must not appear with this frequency
    NotApplicable,
}

use Action::{Expand as E, Limit as L, NotApplicable as N, Special as S};

/// Rows follow [`RulePart`], columns follow [`Frequency`].
#[rustfmt::skip]
const DISPATCH: [[Action; 7]; 9] = [
    // SECONDLY MINUTELY HOURLY DAILY WEEKLY MONTHLY YEARLY
    [L, L, L, L, L, L, E], // BYMONTH
    [N, N, N, N, N, N, E], // BYWEEKNO
    [L, L, L, N, N, N, E], // BYYEARDAY
    [L, L, L, L, N, E, E], // BYMONTHDAY
    [L, L, L, L, E, S, S], // BYDAY
    [L, L, L, E, E, E, E], // BYHOUR
    [L, L, E, E, E, E, E], // BYMINUTE
    [L, E, E, E, E, E, E], // BYSECOND
    [L, L, L, L, L, L, L], // BYSETPOS
];

/// The table entry for `part` under `freq`.
#[must_use]
pub fn action(part: RulePart, freq: Frequency) -> Action {
    DISPATCH
        .get(part as usize)
        .and_then(|row| row.get(freq as usize))
        .copied()
        .unwrap_or(N)
}

/// The table entry with [`Action::Special`] resolved against the other parts
/// of `rule`.
///
/// BYDAY limits a MONTHLY rule that has BYMONTHDAY, and a YEARLY rule that
/// has BYYEARDAY or BYMONTHDAY. Otherwise it expands within the month, the
/// week or the year the earlier parts left.
#[must_use]
pub fn resolve(part: RulePart, rule: &Recur) -> Action {
    match action(part, rule.freq) {
        S => match rule.freq {
            Frequency::Monthly if !rule.by_month_day.is_empty() => L,
            Frequency::Yearly if !rule.by_year_day.is_empty() || !rule.by_month_day.is_empty() => L,
            _ => E,
        },
        other => other,
    }
}

/// The stretch of calendar a candidate stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    Year,
    Month,
    Week,
    Day,
}

/// Working state of one period: a value carrying the time of day and zone,
/// and the civil dates it still stands for. `value.date()` is always `first`.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub value: Temporal,
    pub first: Date,
    pub last: Date,
    pub scope: Scope,
}

impl Candidate {
    /// A single day candidate.
    pub fn day(value: Temporal) -> Self {
        let date = value.date();
        Self {
            value,
            first: date,
            last: date,
            scope: Scope::Day,
        }
    }

    /// A range candidate carrying the time of day of `template`.
    pub fn range(
        template: &Temporal,
        first: Date,
        last: Date,
        scope: Scope,
    ) -> Result<Self, RecurError> {
        Ok(Self {
            value: template.with_date(first)?,
            first,
            last,
            scope,
        })
    }

    /// A single day candidate on `date`, same time of day.
    pub fn on(&self, date: Date) -> Result<Self, RecurError> {
        Ok(Self::day(self.value.with_date(date)?))
    }

    pub fn contains(&self, date: Date) -> bool {
        self.first <= date && date <= self.last
    }

    /// Every date the candidate stands for, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let last = self.last;
        self.first.series(1.day()).take_while(move |d| *d <= last)
    }

    /// Keep the dates that satisfy `keep`. Each contiguous run of kept dates
    /// stays one candidate of the same scope.
    pub fn restrict(self, keep: impl Fn(Date) -> bool) -> Result<Vec<Self>, RecurError> {
        if self.scope == Scope::Day {
            return Ok(if keep(self.first) { vec![self] } else { vec![] });
        }

        let mut runs: Vec<(Date, Date)> = Vec::new();
        for d in self.days().filter(|d| keep(*d)) {
            match runs.last_mut() {
                Some((_, end)) if end.tomorrow().ok() == Some(d) => *end = d,
                _ => runs.push((d, d)),
            }
        }

        match runs.as_slice() {
            [(first, last)] if *first == self.first && *last == self.last => Ok(vec![self]),
            _ => runs
                .into_iter()
                .map(|(first, last)| Self::range(&self.value, first, last, self.scope))
                .collect(),
        }
    }

    /// One day candidate per date of the range.
    pub fn into_days(self) -> Result<Vec<Self>, RecurError> {
        if self.scope == Scope::Day {
            return Ok(vec![self]);
        }
        self.days().map(|d| self.on(d)).collect()
    }
}

/// Resolve a signed position against a period of `len` entries: `-n` is the
/// `n`-th from the end. Returns `None` when the period has no such entry.
pub(crate) fn resolve_index(value: i32, len: i32) -> Option<i32> {
    let n = if value < 0 { len + 1 + value } else { value };
    (1..=len).contains(&n).then_some(n)
}

/// One stage of the expansion pipeline.
pub(crate) trait Transformer: fmt::Debug + Send + Sync {
    /// The rule part this stage implements.
    fn part(&self) -> RulePart;

    /// Run the stage over the candidates of one period.
    fn apply(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError>;
}

/// Settings shared by every stage of one expansion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context {
    pub freq: Frequency,
    pub wkst: jiff::civil::Weekday,
    pub skip: crate::rrule::Skip,
    pub strictness: Strictness,
    pub has_by_month: bool,
}

impl Context {
    pub fn new(rule: &Recur, strictness: Strictness) -> Self {
        Self {
            freq: rule.freq,
            wkst: rule.wkst.into(),
            skip: rule.skip,
            strictness,
            has_by_month: !rule.by_month.is_empty(),
        }
    }
}

/// Build the stages for every part `rule` sets, BYSETPOS excluded, in
/// application order.
///
/// `rule` must already be free of values outside their RFC 5545 range and of
/// parts that are not applicable to its frequency.
pub(crate) fn pipeline(rule: &Recur, strictness: Strictness) -> Vec<Box<dyn Transformer>> {
    let ctx = Context::new(rule, strictness);
    RulePart::iter()
        .filter(|part| *part != RulePart::BySetPos && part.is_set(rule))
        .filter_map(|part| {
            let action = resolve(part, rule);
            let stage: Box<dyn Transformer> = match part {
                RulePart::ByMonth => Box::new(by_month::ByMonth::new(&rule.by_month, action)),
                RulePart::ByWeekNo => Box::new(by_week_no::ByWeekNo::new(&rule.by_week_no, ctx)),
                RulePart::ByYearDay => {
                    Box::new(by_year_day::ByYearDay::new(&rule.by_year_day, action, ctx))
                }
                RulePart::ByMonthDay => {
                    Box::new(by_month_day::ByMonthDay::new(&rule.by_month_day, action, ctx))
                }
                RulePart::ByDay => Box::new(by_day::ByDay::new(&rule.by_day, action, ctx)),
                RulePart::ByHour => {
                    Box::new(by_time::ByTime::new(Field::Hour, &rule.by_hour, action, ctx))
                }
                RulePart::ByMinute => {
                    Box::new(by_time::ByTime::new(Field::Minute, &rule.by_minute, action, ctx))
                }
                RulePart::BySecond => {
                    Box::new(by_time::ByTime::new(Field::Second, &rule.by_second, action, ctx))
                }
                RulePart::BySetPos => return None,
            };
            match action {
                N | S => None,
                L | E => Some(stage),
            }
        })
        .collect()
}
