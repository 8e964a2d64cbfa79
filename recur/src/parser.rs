// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text forms of rules, temporal values, durations and periods.

mod datetime;
mod duration;
mod miscellaneous;
mod period;
mod rrule;

use std::ops::Range;

use chumsky::error::Rich;
use chumsky::prelude::*;
use jiff::Span;

use crate::error::RecurError;
use crate::parser::datetime::{RawTemporal, value_temporal};
use crate::parser::duration::value_duration;
use crate::parser::period::{RawPeriod, value_period};
use crate::parser::rrule::value_rrule;
use crate::period::Period;
use crate::rrule::Recur;
use crate::temporal::Temporal;

/// One parser diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Byte range of the offending input
    pub span: Range<usize>,
    /// What went wrong
    pub message: String,
}

impl From<Rich<'_, char>> for ParseIssue {
    fn from(e: Rich<'_, char>) -> Self {
        Self {
            span: e.span().into_range(),
            message: e.to_string(),
        }
    }
}

/// Parse an RRULE value, with or without the `RRULE:` property name.
///
/// Values outside the RFC 5545 ranges are accepted here and reported by the
/// validator, so that lenient expansion can skip them.
///
/// ## Errors
/// If the text does not follow the grammar, a part repeats, FREQ is missing,
/// or COUNT and UNTIL are both present.
pub fn parse_recur(src: &str) -> Result<Recur, RecurError> {
    let body = src.strip_prefix("RRULE:").unwrap_or(src);
    value_rrule::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(body)
        .into_result()
        .map_err(|errs| parse_error("RRULE", body, errs))
}

/// Parse a DATE, a DATE-TIME, or `TZID=<zone>:<DATE-TIME>`.
///
/// ## Errors
/// If the text is not a temporal value or names an unknown zone.
pub fn parse_temporal(src: &str) -> Result<Temporal, RecurError> {
    value_temporal::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| parse_error("date-time", src, errs))?
        .into_temporal()
}

/// Parse an RFC 5545 duration, e.g. `P1W` or `-PT15M`.
///
/// ## Errors
/// If the text is not a duration.
pub fn parse_duration(src: &str) -> Result<Span, RecurError> {
    value_duration::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| parse_error("duration", src, errs))
}

/// Parse a period, `start/end` or `start/duration`.
///
/// ## Errors
/// If the text is not a period or the end precedes the start.
pub fn parse_period(src: &str) -> Result<Period, RecurError> {
    let raw = value_period::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| parse_error("period", src, errs))?;

    match raw {
        RawPeriod::Explicit(start, end) => {
            let start = start.into_temporal()?;
            let end = end.into_temporal_like(&start)?;
            Period::new(start, end)
        }
        RawPeriod::Start(start, duration) => Period::with_duration(start.into_temporal()?, duration),
    }
}

fn parse_error(what: &'static str, src: &str, errs: Vec<Rich<'_, char>>) -> RecurError {
    RecurError::Parse {
        what,
        input: src.to_string(),
        issues: errs.into_iter().map(ParseIssue::from).collect(),
    }
}

impl RawTemporal {
    fn into_temporal(self) -> Result<Temporal, RecurError> {
        Ok(match self {
            RawTemporal::Date(d) => Temporal::Date(d),
            RawTemporal::Floating(dt) => Temporal::Floating(dt),
            RawTemporal::Utc(dt) => Temporal::Utc(dt),
            RawTemporal::Zoned(tzid, dt) => Temporal::zoned(dt, &tzid)?,
        })
    }

    /// A floating end of a period takes the zone of a zoned start.
    fn into_temporal_like(self, start: &Temporal) -> Result<Temporal, RecurError> {
        match (self, start) {
            (RawTemporal::Floating(dt), Temporal::Zoned(_)) => start.with_civil(dt),
            (raw, _) => raw.into_temporal(),
        }
    }
}
