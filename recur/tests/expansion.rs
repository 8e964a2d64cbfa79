// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion properties: ordering, termination, rule part order, BYSETPOS
//! scope and the strictness levels.

mod common;

use aimcal_recur::{
    ExpandConfig, Period, Recur, RecurError, RulePart, Strictness, Temporal, Termination,
    Violation,
};
use common::{expand, expand_in, expand_with, texts};

const RULES: [&str; 8] = [
    "FREQ=DAILY;COUNT=40",
    "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=40",
    "FREQ=MONTHLY;BYDAY=-1FR,1MO;COUNT=40",
    "FREQ=MONTHLY;BYMONTHDAY=31;SKIP=FORWARD;COUNT=40",
    "FREQ=YEARLY;BYWEEKNO=1,-1;BYDAY=MO,SU;COUNT=40",
    "FREQ=YEARLY;BYYEARDAY=-1,1;BYHOUR=8,20;COUNT=40",
    "FREQ=HOURLY;INTERVAL=7;BYDAY=SA;COUNT=40",
    "FREQ=MINUTELY;INTERVAL=45;BYHOUR=9,10;COUNT=40",
];

#[test]
fn occurrences_strictly_increase() {
    for rule in RULES {
        let expansion = expand(rule, "20240115T093000");
        let occurrences = &expansion.occurrences;
        assert!(
            occurrences.windows(2).all(|w| w[0] < w[1]),
            "{rule} is not strictly increasing: {:?}",
            texts(&expansion)
        );
    }
}

#[test]
fn count_bounds_cardinality() {
    for rule in RULES {
        let expansion = expand(rule, "20240115T093000");
        assert_eq!(expansion.occurrences.len(), 40, "{rule}");
        assert_eq!(expansion.termination, Termination::CountExhausted, "{rule}");
    }
}

#[test]
fn until_bounds_every_occurrence() {
    let until: Temporal = "20260601T000000".parse().unwrap();
    for rule in RULES {
        let rule = rule.replace("COUNT=40", "UNTIL=20260601T000000");
        let expansion = expand(&rule, "20240115T093000");
        assert!(!expansion.occurrences.is_empty(), "{rule}");
        assert!(expansion.occurrences.iter().all(|t| *t <= until), "{rule}");
        assert_eq!(expansion.termination, Termination::UntilExceeded, "{rule}");
    }
}

#[test]
fn until_is_inclusive() {
    let expansion = expand("FREQ=DAILY;UNTIL=20240103T090000", "20240101T090000");
    assert_eq!(
        texts(&expansion),
        ["20240101T090000", "20240102T090000", "20240103T090000"]
    );

    let expansion = expand("FREQ=DAILY;UNTIL=20240103", "20240101");
    assert_eq!(texts(&expansion), ["20240101", "20240102", "20240103"]);
}

#[test]
fn declaration_order_does_not_matter() {
    let a = expand("FREQ=MONTHLY;BYMONTHDAY=15;BYDAY=MO;COUNT=3", "20240101T090000");
    let b = expand("FREQ=MONTHLY;BYDAY=MO;BYMONTHDAY=15;COUNT=3", "20240101T090000");
    assert_eq!(
        texts(&a),
        ["20240115T090000", "20240415T090000", "20240715T090000"]
    );
    assert_eq!(a, b);
}

#[test]
fn last_weekday_of_month() {
    let expansion = expand(
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1;COUNT=4",
        "20240101T090000",
    );
    assert_eq!(
        texts(&expansion),
        [
            "20240131T090000",
            "20240229T090000",
            "20240329T090000",
            "20240430T090000",
        ]
    );
}

#[test]
fn last_day_of_february() {
    let expansion = expand("FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=-1;COUNT=3", "20230101");
    assert_eq!(texts(&expansion), ["20230228", "20240229", "20250228"]);
}

#[test]
fn daily_from_end_of_january() {
    let expansion = expand("FREQ=DAILY;COUNT=3", "20240131");
    assert_eq!(texts(&expansion), ["20240131", "20240201", "20240202"]);
}

#[test]
fn weekly_on_three_days() {
    let expansion = expand("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=6", "20240101T100000");
    assert_eq!(
        texts(&expansion),
        [
            "20240101T100000",
            "20240103T100000",
            "20240105T100000",
            "20240108T100000",
            "20240110T100000",
            "20240112T100000",
        ]
    );
}

#[test]
fn byweekno_outside_yearly_is_refused() {
    let rule: Recur = "FREQ=WEEKLY;BYWEEKNO=10;COUNT=3".parse().unwrap();
    let seed: Temporal = "20240101T090000".parse().unwrap();
    let err = rule
        .expand(&seed, None, &ExpandConfig::default())
        .unwrap_err();
    let RecurError::InvalidRecurrenceSpec { violations } = err else {
        panic!("expected an invalid rule, got {err:?}");
    };
    assert!(violations.iter().any(|v| matches!(
        v,
        Violation::NotApplicable {
            part: RulePart::ByWeekNo,
            ..
        }
    )));
}

#[test]
fn bysetpos_applies_per_period() {
    // per month this is the first Monday of every month; over the whole
    // expansion it would be January 1st alone
    let expansion = expand("FREQ=MONTHLY;BYDAY=MO;BYSETPOS=1;COUNT=3", "20240101T090000");
    assert_eq!(
        texts(&expansion),
        ["20240101T090000", "20240205T090000", "20240304T090000"]
    );
}

#[test]
fn bysetpos_selects_before_seed_is_dropped() {
    // the first weekday of January is before the seed, so January yields
    // nothing rather than the next weekday
    let expansion = expand(
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=1;COUNT=2",
        "20240110T090000",
    );
    assert_eq!(texts(&expansion), ["20240201T090000", "20240301T090000"]);
}

#[test]
fn count_includes_occurrences_before_window() {
    let expansion = expand_in(
        "FREQ=DAILY;COUNT=10",
        "20240101T090000",
        "20240105T000000/20240120T000000",
    );
    assert_eq!(expansion.occurrences.len(), 6);
    assert_eq!(texts(&expansion)[0], "20240105T090000");
    assert_eq!(expansion.termination, Termination::CountExhausted);
}

#[test]
fn window_is_half_open() {
    let expansion = expand_in(
        "FREQ=DAILY",
        "20240101T090000",
        "20240102T090000/20240104T090000",
    );
    assert_eq!(texts(&expansion), ["20240102T090000", "20240103T090000"]);
    assert_eq!(expansion.termination, Termination::WindowExhausted);
}

#[test]
fn occurrences_between_window() {
    let rule: Recur = "FREQ=WEEKLY;BYDAY=SA,SU".parse().unwrap();
    let seed: Temporal = "20240101".parse().unwrap();
    let window: Period = "20240101/P2W".parse().unwrap();
    let got = rule
        .occurrences_between(&seed, &window, &ExpandConfig::default())
        .unwrap();
    let got: Vec<_> = got.iter().map(ToString::to_string).collect();
    assert_eq!(got, ["20240106", "20240107", "20240113", "20240114"]);
}

#[test]
fn skip_moves_missing_days() {
    #[rustfmt::skip]
    let cases = [
        ("OMIT",     ["20240131", "20240331", "20240531", "20240731"]),
        ("BACKWARD", ["20240131", "20240229", "20240331", "20240430"]),
        ("FORWARD",  ["20240131", "20240301", "20240331", "20240501"]),
    ];
    for (skip, expected) in cases {
        let rule = format!("FREQ=MONTHLY;BYMONTHDAY=31;SKIP={skip};COUNT=4");
        assert_eq!(texts(&expand(&rule, "20240131")), expected, "SKIP={skip}");
    }
}

#[test]
fn skip_handles_leap_day_anniversaries() {
    #[rustfmt::skip]
    let cases = [
        ("OMIT",     ["20240229", "20280229", "20320229"]),
        ("BACKWARD", ["20240229", "20250228", "20260228"]),
        ("FORWARD",  ["20240229", "20250301", "20260301"]),
    ];
    for (skip, expected) in cases {
        let rule = format!("FREQ=YEARLY;SKIP={skip};COUNT=3");
        assert_eq!(texts(&expand(&rule, "20240229")), expected, "SKIP={skip}");
    }
}

#[test]
fn skip_forward_does_not_duplicate() {
    // the 30th of February moves onto March 1st, which BYMONTHDAY=1 also picks
    let expansion = expand("FREQ=MONTHLY;BYMONTHDAY=1,30;SKIP=FORWARD;COUNT=5", "20230101");
    assert_eq!(
        texts(&expansion),
        ["20230101", "20230130", "20230201", "20230301", "20230330"]
    );
}

#[test]
fn strictness_decides_out_of_range_values() {
    let rule = "FREQ=MONTHLY;BYMONTHDAY=15,45;COUNT=2";
    let seed = "20240101T090000";

    let lenient = expand(rule, seed);
    assert_eq!(texts(&lenient), ["20240115T090000", "20240215T090000"]);

    let parsed: Recur = rule.parse().unwrap();
    let strict = ExpandConfig::with_strictness(Strictness::Strict);
    assert!(matches!(
        parsed.expand(&seed.parse().unwrap(), None, &strict),
        Err(RecurError::InvalidRecurrenceSpec { .. })
    ));
}

#[test]
fn lenient_ignores_disallowed_ordinals() {
    let expansion = expand("FREQ=WEEKLY;BYDAY=2TU;COUNT=2", "20240101T090000");
    assert_eq!(texts(&expansion), ["20240102T090000", "20240109T090000"]);
}

#[test]
fn date_seed_rejects_time_parts_only_when_strict() {
    let rule = "FREQ=DAILY;BYHOUR=9;COUNT=2";
    let lenient = expand(rule, "20240101");
    assert!(lenient.occurrences.is_empty());

    let config = ExpandConfig::with_strictness(Strictness::Strict);
    let parsed: Recur = rule.parse().unwrap();
    let err = parsed
        .expand(&"20240101".parse().unwrap(), None, &config)
        .unwrap_err();
    assert!(matches!(err, RecurError::TypeMismatch { .. }));
}

#[test]
fn until_kind_mismatch_compares_loosely() {
    // a DATE UNTIL with a DATE-TIME seed is a warning, the whole day counts
    let expansion = expand("FREQ=DAILY;UNTIL=20240103", "20240101T230000");
    assert_eq!(expansion.occurrences.len(), 3);

    let strict = ExpandConfig::with_strictness(Strictness::Strict);
    let rule: Recur = "FREQ=DAILY;UNTIL=20240103".parse().unwrap();
    assert!(
        rule.expand(&"20240101T230000".parse().unwrap(), None, &strict)
            .is_err()
    );
}

#[test]
fn empty_horizon_is_configurable() {
    let config = ExpandConfig {
        max_empty_years: 2,
        ..ExpandConfig::default()
    };
    let expansion = expand_with(
        "FREQ=MONTHLY;BYMONTHDAY=31;BYMONTH=2;COUNT=1",
        "20240101",
        None,
        &config,
    );
    assert!(expansion.occurrences.is_empty());
    assert_eq!(expansion.termination, Termination::WindowExhausted);
}

#[test]
fn daily_leap_day_count_is_honored() {
    let expansion = expand("FREQ=DAILY;BYMONTH=2;BYMONTHDAY=29;COUNT=3", "20240229");
    assert_eq!(texts(&expansion), ["20240229", "20280229", "20320229"]);
    assert_eq!(expansion.termination, Termination::CountExhausted);

    // eight years without a February 29th
    let expansion = expand("FREQ=DAILY;BYMONTH=2;BYMONTHDAY=29;COUNT=2", "20960229");
    assert_eq!(texts(&expansion), ["20960229", "21040229"]);
    assert_eq!(expansion.termination, Termination::CountExhausted);
}

#[test]
fn hourly_leap_day_count_is_honored() {
    let expansion = expand(
        "FREQ=HOURLY;BYMONTH=2;BYMONTHDAY=29;BYHOUR=9;COUNT=2",
        "20240229T090000",
    );
    assert_eq!(texts(&expansion), ["20240229T090000", "20280229T090000"]);
    assert_eq!(expansion.termination, Termination::CountExhausted);
}

#[test]
fn distant_window_starts_near_its_start() {
    // decades of periods before the window
    let expansion = expand_in(
        "FREQ=SECONDLY;INTERVAL=30",
        "20000101T000000",
        "20240101T000000/20240101T000500",
    );
    let occurrences = texts(&expansion);
    assert_eq!(occurrences.len(), 10);
    assert_eq!(occurrences[0], "20240101T000000");
    assert_eq!(occurrences[9], "20240101T000430");
    assert_eq!(expansion.termination, Termination::WindowExhausted);

    let expansion = expand_in(
        "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=29",
        "19040229",
        "20200101/20300101",
    );
    assert_eq!(texts(&expansion), ["20240229", "20280229"]);
}

#[test]
fn distant_window_keeps_days_carried_over() {
    // February has no 31st, the skipped day lands on March 1st
    let expansion = expand_in(
        "FREQ=MONTHLY;BYMONTHDAY=31;SKIP=FORWARD",
        "20000131T090000",
        "20240301T000000/20240401T000000",
    );
    assert_eq!(texts(&expansion), ["20240301T090000", "20240331T090000"]);
}
