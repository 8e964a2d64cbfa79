// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule grammar, RFC 5545 Section 3.3.10.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_SKIP, KW_RRULE_SKIP_BACKWARD, KW_RRULE_SKIP_FORWARD, KW_RRULE_SKIP_OMIT,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::parser::datetime::{value_date, value_date_time};
use crate::parser::miscellaneous::{ValueExpected, signed, unsigned};
use crate::rrule::{Frequency, Recur, RecurBound, Skip, WeekDay, WeekDayNum};
use crate::temporal::Temporal;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
///
/// Numeric lists are read into the width of their field without range
/// checks, the validator reports values outside the RFC 5545 ranges.
pub fn value_rrule<'src, I, E>() -> impl Parser<'src, I, Recur, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    recur_rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts::<I, E::Error>)
}

fn build_from_parts<'src, I, Err>(parts: Vec<Part>, span: I::Span) -> Result<Recur, Err>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    Err: LabelError<'src, I, ValueExpected>,
{
    let duplicate = || Err::expected_found([ValueExpected::RRuleDuplicatePart], None, span);

    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut by_second = None;
    let mut by_minute = None;
    let mut by_hour = None;
    let mut by_month_day = None;
    let mut by_year_day = None;
    let mut by_week_no = None;
    let mut by_month = None;
    let mut by_day = None;
    let mut by_set_pos = None;
    let mut wkst = None;
    let mut skip = None;

    for part in parts {
        match part {
            Part::Freq(v) => fill(&mut freq, v, duplicate)?,
            Part::Until(v) => fill(&mut until, v, duplicate)?,
            Part::Count(v) => fill(&mut count, v, duplicate)?,
            Part::Interval(v) => fill(&mut interval, v, duplicate)?,
            Part::BySecond(v) => fill(&mut by_second, v, duplicate)?,
            Part::ByMinute(v) => fill(&mut by_minute, v, duplicate)?,
            Part::ByHour(v) => fill(&mut by_hour, v, duplicate)?,
            Part::ByMonthDay(v) => fill(&mut by_month_day, v, duplicate)?,
            Part::ByYearDay(v) => fill(&mut by_year_day, v, duplicate)?,
            Part::ByWeekNo(v) => fill(&mut by_week_no, v, duplicate)?,
            Part::ByMonth(v) => fill(&mut by_month, v, duplicate)?,
            Part::ByDay(v) => fill(&mut by_day, v, duplicate)?,
            Part::BySetPos(v) => fill(&mut by_set_pos, v, duplicate)?,
            Part::Wkst(v) => fill(&mut wkst, v, duplicate)?,
            Part::Skip(v) => fill(&mut skip, v, duplicate)?,
        }
    }

    // Validate required FREQ
    let freq =
        freq.ok_or_else(|| Err::expected_found([ValueExpected::RRuleRequiredFreq], None, span))?;

    // Validate UNTIL and COUNT are mutually exclusive
    let bound = match (until, count) {
        (Some(_), Some(_)) => {
            return Err(Err::expected_found(
                [ValueExpected::RRuleCountUntilExclusion],
                None,
                span,
            ));
        }
        (Some(until), None) => Some(RecurBound::Until(until)),
        (None, Some(count)) => Some(RecurBound::Count(count)),
        (None, None) => None,
    };

    Ok(Recur {
        freq,
        interval: interval.unwrap_or(1),
        bound,
        by_second: by_second.unwrap_or_default(),
        by_minute: by_minute.unwrap_or_default(),
        by_hour: by_hour.unwrap_or_default(),
        by_month_day: by_month_day.unwrap_or_default(),
        by_year_day: by_year_day.unwrap_or_default(),
        by_week_no: by_week_no.unwrap_or_default(),
        by_month: by_month.unwrap_or_default(),
        by_day: by_day.unwrap_or_default(),
        by_set_pos: by_set_pos.unwrap_or_default(),
        wkst: wkst.unwrap_or(WeekDay::Monday),
        skip: skip.unwrap_or_default(),
    })
}

/// Each slot is filled at most once.
fn fill<T, E>(slot: &mut Option<T>, value: T, duplicate: impl Fn() -> E) -> Result<(), E> {
    match slot {
        Some(_) => Err(duplicate()),
        None => {
            *slot = Some(value);
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(Temporal),
    Count(u32),
    Interval(u32),
    BySecond(Vec<u8>),
    ByMinute(Vec<u8>),
    ByHour(Vec<u8>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<u8>),
    ByDay(Vec<WeekDayNum>),
    BySetPos(Vec<i16>),
    Wkst(WeekDay),
    Skip(Skip),
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
///                 / ( "SKIP" "=" ("OMIT" / "BACKWARD" / "FORWARD") )
/// ```
///
/// SKIP comes from RFC 7529. Its RSCALE companion is not supported.
fn recur_rrule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));

    choice((
        kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq),
        kw(KW_RRULE_UNTIL).ignore_then(enddate()).map(Part::Until),
        kw(KW_RRULE_COUNT)
            .ignore_then(unsigned(10))
            .map(Part::Count),
        kw(KW_RRULE_INTERVAL)
            .ignore_then(unsigned(10))
            .map(Part::Interval),
        kw(KW_RRULE_BYSECOND)
            .ignore_then(list(unsigned(3)))
            .map(Part::BySecond),
        kw(KW_RRULE_BYMINUTE)
            .ignore_then(list(unsigned(3)))
            .map(Part::ByMinute),
        kw(KW_RRULE_BYHOUR)
            .ignore_then(list(unsigned(3)))
            .map(Part::ByHour),
        kw(KW_RRULE_BYDAY)
            .ignore_then(list(weekdaynum()))
            .map(Part::ByDay),
        kw(KW_RRULE_BYMONTHDAY)
            .ignore_then(list(signed(3)))
            .map(Part::ByMonthDay),
        kw(KW_RRULE_BYYEARDAY)
            .ignore_then(list(signed(4)))
            .map(Part::ByYearDay),
        kw(KW_RRULE_BYWEEKNO)
            .ignore_then(list(signed(3)))
            .map(Part::ByWeekNo),
        kw(KW_RRULE_BYMONTH)
            .ignore_then(list(unsigned(3)))
            .map(Part::ByMonth),
        kw(KW_RRULE_BYSETPOS)
            .ignore_then(list(signed(4)))
            .map(Part::BySetPos),
        kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst),
        kw(KW_RRULE_SKIP).ignore_then(skip()).map(Part::Skip),
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src, I, E>() -> impl Parser<'src, I, Frequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(Frequency::Secondly),
        just(KW_RRULE_FREQ_MINUTELY).to(Frequency::Minutely),
        just(KW_RRULE_FREQ_HOURLY).to(Frequency::Hourly),
        just(KW_RRULE_FREQ_DAILY).to(Frequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(Frequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(Frequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(Frequency::Yearly),
    ))
}

/// ```txt
/// enddate     = date / date-time
/// ```
fn enddate<'src, I, E>() -> impl Parser<'src, I, Temporal, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    // Try date-time first, then fall back to date
    choice((
        value_date_time()
            .then(just('Z').or_not())
            .map(|(dt, utc)| match utc {
                Some(_) => Temporal::Utc(dt),
                None => Temporal::Floating(dt),
            }),
        value_date().map(Temporal::Date),
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    signed(3)
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

fn skip<'src, I, E>() -> impl Parser<'src, I, Skip, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_RRULE_SKIP_OMIT).to(Skip::Omit),
        just(KW_RRULE_SKIP_BACKWARD).to(Skip::Backward),
        just(KW_RRULE_SKIP_FORWARD).to(Skip::Forward),
    ))
}

/// ```txt
/// list        = ( item *("," item) )
/// ```
fn list<'src, I, E, T>(item: impl Parser<'src, I, T, E>) -> impl Parser<'src, I, Vec<T>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    item.separated_by(just(',')).at_least(1).collect()
}

#[cfg(test)]
mod tests {
    use chumsky::extra;
    use chumsky::input::Stream;
    use jiff::civil::{date, datetime};

    use super::*;

    fn parse(src: &'_ str) -> Result<Recur, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        value_rrule::<'_, _, extra::Err<_>>()
            .then_ignore(end())
            .parse(stream)
            .into_result()
    }

    #[test]
    fn parses_rrule_freq_only() {
        let freqs = [
            ("FREQ=SECONDLY", Frequency::Secondly),
            ("FREQ=MINUTELY", Frequency::Minutely),
            ("FREQ=HOURLY", Frequency::Hourly),
            ("FREQ=DAILY", Frequency::Daily),
            ("FREQ=WEEKLY", Frequency::Weekly),
            ("FREQ=MONTHLY", Frequency::Monthly),
            ("FREQ=YEARLY", Frequency::Yearly),
        ];

        for (src, expected_freq) in freqs {
            let result = parse(src).unwrap();
            assert_eq!(result, Recur::new(expected_freq), "Failed for {src}");
        }
    }

    #[test]
    fn parses_rrule_with_until() {
        let result = parse("FREQ=DAILY;UNTIL=19971224T000000Z").unwrap();
        assert_eq!(
            result.until(),
            Some(&Temporal::Utc(datetime(1997, 12, 24, 0, 0, 0, 0)))
        );

        let result = parse("FREQ=DAILY;UNTIL=19971224").unwrap();
        assert_eq!(result.until(), Some(&Temporal::Date(date(1997, 12, 24))));

        let result = parse("FREQ=DAILY;UNTIL=19971224T090000").unwrap();
        assert_eq!(
            result.until(),
            Some(&Temporal::Floating(datetime(1997, 12, 24, 9, 0, 0, 0)))
        );
    }

    #[test]
    fn parses_rrule_with_count_and_interval() {
        let result = parse("FREQ=DAILY;COUNT=10;INTERVAL=2").unwrap();
        assert_eq!(result.count(), Some(10));
        assert_eq!(result.interval, 2);

        // kept for the validator and the engine to judge
        let result = parse("FREQ=DAILY;COUNT=0;INTERVAL=0").unwrap();
        assert_eq!(result.count(), Some(0));
        assert_eq!(result.interval, 0);
    }

    #[test]
    fn parses_rrule_with_byday() {
        let result = parse("FREQ=WEEKLY;BYDAY=MO,WE,FR").unwrap();
        assert_eq!(
            result.by_day,
            vec![
                WeekDayNum::every(WeekDay::Monday),
                WeekDayNum::every(WeekDay::Wednesday),
                WeekDayNum::every(WeekDay::Friday),
            ]
        );

        let result = parse("FREQ=MONTHLY;BYDAY=1MO,-1MO,+2TU,20FR").unwrap();
        assert_eq!(
            result.by_day,
            vec![
                WeekDayNum::nth(1, WeekDay::Monday),
                WeekDayNum::nth(-1, WeekDay::Monday),
                WeekDayNum::nth(2, WeekDay::Tuesday),
                WeekDayNum::nth(20, WeekDay::Friday),
            ]
        );
    }

    #[test]
    fn parses_rrule_with_numeric_lists() {
        let result = parse(
            "FREQ=YEARLY;BYSECOND=0,30;BYMINUTE=0,20,40;BYHOUR=9,17;BYMONTHDAY=1,15,-1;\
             BYYEARDAY=1,100,-366;BYWEEKNO=20,-1;BYMONTH=1,2,3;BYSETPOS=-1,3",
        )
        .unwrap();
        assert_eq!(result.by_second, vec![0, 30]);
        assert_eq!(result.by_minute, vec![0, 20, 40]);
        assert_eq!(result.by_hour, vec![9, 17]);
        assert_eq!(result.by_month_day, vec![1, 15, -1]);
        assert_eq!(result.by_year_day, vec![1, 100, -366]);
        assert_eq!(result.by_week_no, vec![20, -1]);
        assert_eq!(result.by_month, vec![1, 2, 3]);
        assert_eq!(result.by_set_pos, vec![-1, 3]);
    }

    #[test]
    fn keeps_out_of_range_values() {
        let result = parse("FREQ=MONTHLY;BYMONTHDAY=0,45;BYMONTH=13;BYHOUR=24").unwrap();
        assert_eq!(result.by_month_day, vec![0, 45]);
        assert_eq!(result.by_month, vec![13]);
        assert_eq!(result.by_hour, vec![24]);
    }

    #[test]
    fn parses_rrule_wkst_and_skip() {
        let result = parse("FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=29;SKIP=BACKWARD;WKST=SU").unwrap();
        assert_eq!(result.wkst, WeekDay::Sunday);
        assert_eq!(result.skip, Skip::Backward);

        let result = parse("FREQ=YEARLY;SKIP=FORWARD").unwrap();
        assert_eq!(result.skip, Skip::Forward);
    }

    #[test]
    fn parses_rrule_parts_in_any_order() {
        let a = parse("BYDAY=MO;COUNT=3;FREQ=MONTHLY;BYMONTHDAY=15").unwrap();
        let b = parse("FREQ=MONTHLY;BYMONTHDAY=15;BYDAY=MO;COUNT=3").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn round_trips_rfc_examples() {
        let cases = [
            "FREQ=DAILY;COUNT=10",
            "FREQ=DAILY;UNTIL=19971224T000000Z",
            "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR;WKST=SU",
            "FREQ=MONTHLY;COUNT=10;BYDAY=1FR",
            "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2",
            "FREQ=YEARLY;BYDAY=20MO",
            "FREQ=YEARLY;BYDAY=MO;BYWEEKNO=20",
            "FREQ=YEARLY;INTERVAL=4;BYMINUTE=30;BYHOUR=8,9;BYDAY=SU;BYMONTH=1",
        ];
        for src in cases {
            assert_eq!(parse(src).unwrap().to_string(), src);
        }
    }

    #[test]
    fn rejects_invalid_rrules() {
        let fail_cases = [
            "",                                           // empty
            "COUNT=10",                                   // missing FREQ
            "FREQ=DAILY;FREQ=WEEKLY",                     // duplicate FREQ
            "FREQ=DAILY;BYHOUR=1;BYHOUR=2",               // duplicate BYHOUR
            "FREQ=DAILY;COUNT=10;UNTIL=19971224T000000Z", // COUNT and UNTIL
            "FREQ=FORTNIGHTLY",                           // unknown frequency
            "FREQ=DAILY;BYDAY=XX",                        // unknown weekday
            "FREQ=DAILY;BYHOUR=",                         // empty list
            "FREQ=DAILY;BYHOUR=1,,2",                     // empty item
            "FREQ=DAILY;BYMONTH=-1",                      // signed month
            "FREQ=DAILY;BYMONTHDAY=200",                  // wider than the field
            "FREQ=DAILY;UNTIL=19971332",                  // invalid date
            "FREQ=DAILY;SKIP=LATER",                      // unknown skip
            "freq=daily",                                 // case-sensitive
            "FREQ=DAILY;",                                // trailing separator
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }
}
