// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE and DATE-TIME values, RFC 5545 Sections 3.3.4 and 3.3.5.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::civil::{Date, DateTime, Time};

use crate::keyword::KW_TZID;
use crate::parser::miscellaneous::{
    ValueExpected, i8_0_1, i8_0_2, i8_0_3, i8_0_5, i8_0_9, i8_1_2, i8_1_9, i16_0_9,
};

/// A temporal value before its zone is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTemporal {
    Date(Date),
    Floating(DateTime),
    Utc(DateTime),
    Zoned(String, DateTime),
}

/// ```txt
/// temporal   = date / date-time / "TZID=" tzid ":" date-time
/// ```
///
/// The last form is the command line spelling of a DATE-TIME with a TZID
/// parameter. Its date-time carries no `Z`.
pub fn value_temporal<'src, I, E>() -> impl Parser<'src, I, RawTemporal, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let tzid = just(KW_TZID)
        .ignore_then(just('='))
        .ignore_then(
            select! { c if c != ':' => c }
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .then_ignore(just(':'));

    choice((
        tzid.then(value_date_time())
            .map(|(tzid, dt)| RawTemporal::Zoned(tzid, dt)),
        value_date_time()
            .then(just('Z').or_not())
            .map(|(dt, utc)| match utc {
                Some(_) => RawTemporal::Utc(dt),
                None => RawTemporal::Floating(dt),
            }),
        value_date().map(RawTemporal::Date),
    ))
}

/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub fn value_date<'src, I, E>() -> impl Parser<'src, I, Date, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day)
                .map_err(|_| E::Error::expected_found([ValueExpected::Date], None, span))
        })
}

/// ```txt
/// date-time  = date "T" time
/// time       = time-hour time-minute time-second
/// ```
///
/// The optional `time-utc` designator is left to the caller. A leap second
/// 60 is contracted to 59.
pub fn value_date_time<'src, I, E>() -> impl Parser<'src, I, DateTime, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| date.to_datetime(time))
}

/// ```txt
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, Time, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let hour = choice((
        i8_0_1().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(i8_0_3()).map(|b| 20 + b),
    ));
    let minute = i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b);
    let second = choice((
        i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just("60").to(59), // leap second
    ));

    hour.then(minute)
        .then(second)
        .map(|((h, m), s)| jiff::civil::time(h, m, s, 0))
}
