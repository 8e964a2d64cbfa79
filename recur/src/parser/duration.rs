// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::Span;

use crate::parser::miscellaneous::{ValueExpected, is_positive, unsigned};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
///
/// Days and weeks stay calendar units in the resulting span, so adding it to
/// a zoned value keeps the wall clock across DST changes.
pub fn value_duration<'src, I, E>() -> impl Parser<'src, I, Span, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    // case-sensitive
    let int = unsigned::<I, E, i64>(10);

    let week = int.clone().then_ignore(just('W'));

    let second_val = int.clone().then_ignore(just('S'));
    let minute_val = int.clone().then_ignore(just('M'));
    let hour_val = int.clone().then_ignore(just('H'));

    // dur-second = 1*DIGIT "S"
    let second_only = second_val.clone().map(|s| (0, 0, s));

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute_val
        .clone()
        .then(second_val.clone().or_not())
        .map(|(m, s)| (0, m, s.unwrap_or(0)));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, opt_ms)| match opt_ms {
            Some((m, opt_s)) => (h, m, opt_s.unwrap_or(0)),
            None => (h, 0, 0),
        });

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second_only)));

    let day = int.then_ignore(just('D'));
    let date = day.then(time.clone().or_not());

    let body = choice((
        date.map(|(d, t)| {
            let (h, m, s) = t.unwrap_or((0, 0, 0));
            Fields::new(0, d, h, m, s)
        }),
        time.map(|(h, m, s)| Fields::new(0, 0, h, m, s)),
        week.map(|w| Fields::new(w, 0, 0, 0, 0)),
    ));

    is_positive()
        .then_ignore(just('P'))
        .then(body)
        .try_map(|(positive, fields), span| {
            fields
                .to_span(positive)
                .map_err(|_| E::Error::expected_found([ValueExpected::Duration], None, span))
        })
}

#[derive(Debug, Clone, Copy)]
struct Fields {
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl Fields {
    const fn new(weeks: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            weeks,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    fn to_span(self, positive: bool) -> Result<Span, jiff::Error> {
        let span = Span::new()
            .try_weeks(self.weeks)?
            .try_days(self.days)?
            .try_hours(self.hours)?
            .try_minutes(self.minutes)?
            .try_seconds(self.seconds)?;
        Ok(if positive { span } else { span.negate() })
    }
}
