// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type definitions, RFC 5545 Section 3.3.10.

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::Weekday;
use jiff::Span;

use crate::error::RecurError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_SKIP, KW_RRULE_SKIP_BACKWARD, KW_RRULE_SKIP_FORWARD, KW_RRULE_SKIP_OMIT,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::temporal::Temporal;

/// Recurrence rule
///
/// Build one with [`Recur::builder`] or parse it from RRULE text:
///
/// ```
/// # use aimcal_recur::{Frequency, Recur};
/// let rule: Recur = "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=6".parse().unwrap();
/// assert_eq!(rule.freq, Frequency::Weekly);
/// assert_eq!(rule.to_string(), "FREQ=WEEKLY;COUNT=6;BYDAY=MO,WE,FR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recur {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Number of frequency units between periods, at least 1
    pub interval: u32,
    /// COUNT or UNTIL, at most one of them
    pub bound: Option<RecurBound>,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Positions within the set of one period
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: WeekDay,
    /// Handling of days that do not exist in a period
    pub skip: Skip,
}

impl Recur {
    /// A rule of frequency `freq` with every other part at its default.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            bound: None,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_day: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: WeekDay::Monday,
            skip: Skip::Omit,
        }
    }

    /// Start building a rule of frequency `freq`.
    #[must_use]
    pub const fn builder(freq: Frequency) -> RecurBuilder {
        RecurBuilder(Self::new(freq))
    }

    /// The COUNT part, if any.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self.bound {
            Some(RecurBound::Count(n)) => Some(n),
            _ => None,
        }
    }

    /// The UNTIL part, if any.
    #[must_use]
    pub const fn until(&self) -> Option<&Temporal> {
        match &self.bound {
            Some(RecurBound::Until(t)) => Some(t),
            _ => None,
        }
    }
}

impl FromStr for Recur {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_recur(s)
    }
}

impl Display for Recur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;

        match &self.bound {
            // UNTIL of a zoned rule is written in UTC
            Some(RecurBound::Until(until)) => write!(f, ";{KW_RRULE_UNTIL}={}", until.to_utc())?,
            Some(RecurBound::Count(count)) => write!(f, ";{KW_RRULE_COUNT}={count}")?,
            None => {}
        }

        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }

        write_list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        write_list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        write_list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        write_list(f, KW_RRULE_BYDAY, &self.by_day)?;
        write_list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        write_list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        write_list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;

        if self.wkst != WeekDay::Monday {
            write!(f, ";{KW_RRULE_WKST}={}", self.wkst)?;
        }
        if self.skip != Skip::Omit {
            write!(f, ";{KW_RRULE_SKIP}={}", self.skip)?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, kw: &str, values: &[T]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        match i {
            0 => write!(f, ";{kw}={value}")?,
            _ => write!(f, ",{value}")?,
        }
    }
    Ok(())
}

/// Builder for [`Recur`].
#[derive(Debug, Clone)]
pub struct RecurBuilder(Recur);

impl RecurBuilder {
    /// Set the interval between periods.
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.0.interval = interval;
        self
    }

    /// Stop after `count` occurrences. Replaces any UNTIL.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.0.bound = Some(RecurBound::Count(count));
        self
    }

    /// Stop after `until`, inclusive. Replaces any COUNT.
    #[must_use]
    pub fn until(mut self, until: Temporal) -> Self {
        self.0.bound = Some(RecurBound::Until(until));
        self
    }

    /// Set BYSECOND.
    #[must_use]
    pub fn by_second(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.0.by_second = values.into_iter().collect();
        self
    }

    /// Set BYMINUTE.
    #[must_use]
    pub fn by_minute(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.0.by_minute = values.into_iter().collect();
        self
    }

    /// Set BYHOUR.
    #[must_use]
    pub fn by_hour(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.0.by_hour = values.into_iter().collect();
        self
    }

    /// Set BYMONTHDAY.
    #[must_use]
    pub fn by_month_day(mut self, values: impl IntoIterator<Item = i8>) -> Self {
        self.0.by_month_day = values.into_iter().collect();
        self
    }

    /// Set BYYEARDAY.
    #[must_use]
    pub fn by_year_day(mut self, values: impl IntoIterator<Item = i16>) -> Self {
        self.0.by_year_day = values.into_iter().collect();
        self
    }

    /// Set BYWEEKNO.
    #[must_use]
    pub fn by_week_no(mut self, values: impl IntoIterator<Item = i8>) -> Self {
        self.0.by_week_no = values.into_iter().collect();
        self
    }

    /// Set BYMONTH.
    #[must_use]
    pub fn by_month(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.0.by_month = values.into_iter().collect();
        self
    }

    /// Set BYDAY.
    #[must_use]
    pub fn by_day(mut self, values: impl IntoIterator<Item = WeekDayNum>) -> Self {
        self.0.by_day = values.into_iter().collect();
        self
    }

    /// Set BYSETPOS.
    #[must_use]
    pub fn by_set_pos(mut self, values: impl IntoIterator<Item = i16>) -> Self {
        self.0.by_set_pos = values.into_iter().collect();
        self
    }

    /// Set the week start day.
    #[must_use]
    pub fn wkst(mut self, wkst: WeekDay) -> Self {
        self.0.wkst = wkst;
        self
    }

    /// Set the SKIP policy.
    #[must_use]
    pub fn skip(mut self, skip: Skip) -> Self {
        self.0.skip = skip;
        self
    }

    /// Finish the rule.
    #[must_use]
    pub fn build(self) -> Recur {
        self.0
    }
}

/// COUNT or UNTIL. RFC 5545 forbids both in one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurBound {
    /// Number of occurrences
    Count(u32),
    /// Last instant an occurrence may fall on, inclusive
    Until(Temporal),
}

/// Recurrence frequency, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The span covering `n` periods of this frequency.
    ///
    /// ## Errors
    /// If `n` periods exceed the range of a span.
    pub fn span(self, n: i64) -> Result<Span, jiff::Error> {
        let span = Span::new();
        match self {
            Frequency::Secondly => span.try_seconds(n),
            Frequency::Minutely => span.try_minutes(n),
            Frequency::Hourly => span.try_hours(n),
            Frequency::Daily => span.try_days(n),
            Frequency::Weekly => span.try_weeks(n),
            Frequency::Monthly => span.try_months(n),
            Frequency::Yearly => span.try_years(n),
        }
    }

    /// Whether periods of this frequency are shorter than a day.
    #[must_use]
    pub const fn is_sub_daily(self) -> bool {
        matches!(
            self,
            Frequency::Secondly | Frequency::Minutely | Frequency::Hourly
        )
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            Frequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            Frequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            Frequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            Frequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            Frequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            Frequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence within the period, negative counts from the end
    pub occurrence: Option<i8>,
}

impl WeekDayNum {
    /// Every `day` of the period.
    #[must_use]
    pub const fn every(day: WeekDay) -> Self {
        Self {
            day,
            occurrence: None,
        }
    }

    /// The `n`-th `day` of the period.
    #[must_use]
    pub const fn nth(n: i8, day: WeekDay) -> Self {
        Self {
            day,
            occurrence: Some(n),
        }
    }
}

impl From<WeekDay> for WeekDayNum {
    fn from(day: WeekDay) -> Self {
        Self::every(day)
    }
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.occurrence {
            Some(n) => write!(f, "{n}{}", self.day),
            None => write!(f, "{}", self.day),
        }
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}

impl From<WeekDay> for Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => Weekday::Sunday,
            WeekDay::Monday => Weekday::Monday,
            WeekDay::Tuesday => Weekday::Tuesday,
            WeekDay::Wednesday => Weekday::Wednesday,
            WeekDay::Thursday => Weekday::Thursday,
            WeekDay::Friday => Weekday::Friday,
            WeekDay::Saturday => Weekday::Saturday,
        }
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => WeekDay::Sunday,
            Weekday::Monday => WeekDay::Monday,
            Weekday::Tuesday => WeekDay::Tuesday,
            Weekday::Wednesday => WeekDay::Wednesday,
            Weekday::Thursday => WeekDay::Thursday,
            Weekday::Friday => WeekDay::Friday,
            Weekday::Saturday => WeekDay::Saturday,
        }
    }
}

/// How to treat a day a rule part selects but the period lacks, e.g. the
/// 31st of April. RFC 7529 Section 4.1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Skip {
    /// Drop the occurrence
    #[default]
    Omit,
    /// Use the last valid day of the period
    Backward,
    /// Use the first day of the next period
    Forward,
}

impl Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::Omit => write!(f, "{KW_RRULE_SKIP_OMIT}"),
            Skip::Backward => write!(f, "{KW_RRULE_SKIP_BACKWARD}"),
            Skip::Forward => write!(f, "{KW_RRULE_SKIP_FORWARD}"),
        }
    }
}
