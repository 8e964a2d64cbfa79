// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared building blocks of the value parsers.

use std::borrow::Cow;

use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A calendar date that exists
    Date,
    /// An integer that fits the rule part
    Integer,
    /// A duration jiff can represent
    Duration,
    /// Each rule part at most once
    RRuleDuplicatePart,
    /// FREQ is required
    RRuleRequiredFreq,
    /// COUNT and UNTIL exclude each other
    RRuleCountUntilExclusion,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::Integer => Self::Label(Cow::Borrowed("integer out of range")),
            ValueExpected::Duration => Self::Label(Cow::Borrowed("duration out of range")),
            ValueExpected::RRuleDuplicatePart => {
                Self::Label(Cow::Borrowed("each rule part at most once"))
            }
            ValueExpected::RRuleRequiredFreq => Self::Label(Cow::Borrowed("FREQ rule part")),
            ValueExpected::RRuleCountUntilExclusion => {
                Self::Label(Cow::Borrowed("either COUNT or UNTIL, not both"))
            }
        }
    }
}

/// Optional sign, `true` unless it is `-`.
pub(crate) fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

/// Up to `max_digits` decimal digits, parsed into `T`.
pub(crate) fn unsigned<'src, I, E, T>(max_digits: usize) -> impl Parser<'src, I, T, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
    T: lexical::FromLexical,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(max_digits)
        .collect::<String>()
        .try_map_with(|str, e| {
            lexical::parse::<T, _>(&str)
                .map_err(|_| E::Error::expected_found([ValueExpected::Integer], None, e.span()))
        })
}

/// An optionally signed integer of up to `max_digits` digits.
///
/// Range checks against the rule part are left to the caller, only the width
/// of `T` is enforced here.
pub(crate) fn signed<'src, I, E, T>(max_digits: usize) -> impl Parser<'src, I, T, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
    T: TryFrom<i32>,
{
    is_positive()
        .then(unsigned::<I, E, i32>(max_digits))
        .try_map_with(|(positive, n), e| {
            let n = if positive { n } else { -n };
            T::try_from(n)
                .map_err(|_| E::Error::expected_found([ValueExpected::Integer], None, e.span()))
        })
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        pub(crate) const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_5 : i8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
