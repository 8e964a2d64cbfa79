// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period of time value, RFC 5545 Section 3.3.9.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::Span;

use crate::parser::datetime::{RawTemporal, value_temporal};
use crate::parser::duration::value_duration;
use crate::parser::miscellaneous::ValueExpected;

#[derive(Debug, Clone)]
pub enum RawPeriod {
    Explicit(RawTemporal, RawTemporal),
    Start(RawTemporal, Span),
}

/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// period-start = date-time "/" dur-value
/// ```
///
/// DATE bounds are accepted too, so that whole days can serve as a query
/// window.
pub fn value_period<'src, I, E>() -> impl Parser<'src, I, RawPeriod, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_temporal()
        .then_ignore(just('/'))
        .then(choice((
            value_duration().map(End::Duration),
            value_temporal().map(End::Temporal),
        )))
        .map(|(start, end)| match end {
            End::Temporal(end) => RawPeriod::Explicit(start, end),
            End::Duration(duration) => RawPeriod::Start(start, duration),
        })
}

enum End {
    Temporal(RawTemporal),
    Duration(Span),
}
