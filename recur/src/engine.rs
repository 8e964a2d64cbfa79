// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of a recurrence rule into concrete occurrences.
//!
//! Every period of the rule starts as one candidate covering the whole
//! period. The rule parts then narrow or multiply the candidates in the order
//! RFC 5545 Section 3.3.10 lays down, and what survives is sorted, passed
//! through BYSETPOS and checked against COUNT, UNTIL and the query window.

use std::cmp::Ordering;

use jiff::ToSpan;
use jiff::civil::{Date, Time};

use crate::config::ExpandConfig;
use crate::error::RecurError;
use crate::period::{Period, RangePosition};
use crate::rrule::{Frequency, Recur, WeekDayNum};
use crate::temporal::week::{first_week_start, start_of_week};
use crate::temporal::{Field, Temporal};
use crate::transform::{self, BySetPos, Candidate, RulePart, Scope, Transformer};
use crate::validate::{Severity, Violation, validate_with_seed};

/// Why an expansion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Termination {
    /// COUNT occurrences were produced
    CountExhausted,
    /// The next occurrence would fall after UNTIL
    UntilExceeded,
    /// The query window ended, or the rule produced nothing for too long
    WindowExhausted,
}

/// The result of [`Recur::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Occurrences in ascending order, without duplicates
    pub occurrences: Vec<Temporal>,
    /// The terminal state the expansion reached
    pub termination: Termination,
}

impl Recur {
    /// Expand the rule from `seed`, the DTSTART of the recurrence.
    ///
    /// Occurrences before `seed` are dropped, and `seed` itself appears only
    /// if the rule selects it. COUNT counts every occurrence from `seed` on,
    /// also those before `window`, which is half-open. UNTIL is inclusive.
    ///
    /// ## Errors
    /// - [`RecurError::InvalidRecurrenceSpec`] if validation finds errors
    ///   under the configured strictness.
    /// - [`RecurError::UnboundedExpansion`] without COUNT, UNTIL and window.
    /// - [`RecurError::TypeMismatch`] for a DATE seed with a frequency below
    ///   a day, or for a DATE seed given a time of day under
    ///   [`Strictness::Strict`](crate::config::Strictness::Strict).
    #[tracing::instrument(level = "debug", skip_all, fields(rule = %self, seed = %seed))]
    pub fn expand(
        &self,
        seed: &Temporal,
        window: Option<&Period>,
        config: &ExpandConfig,
    ) -> Result<Expansion, RecurError> {
        let plan = Plan::new(self, seed, window, config)?;
        plan.run(window)
    }

    /// The occurrences of the rule that fall within `window`.
    ///
    /// ## Errors
    /// See [`Recur::expand`].
    pub fn occurrences_between(
        &self,
        seed: &Temporal,
        window: &Period,
        config: &ExpandConfig,
    ) -> Result<Vec<Temporal>, RecurError> {
        Ok(self.expand(seed, Some(window), config)?.occurrences)
    }
}

/// The rule as it is expanded: sanitized, with the implicit parts filled in
/// from the seed, and compiled into pipeline stages.
#[derive(Debug)]
struct Plan {
    rule: Recur,
    seed: Temporal,
    until: Option<Temporal>,
    count: Option<u32>,
    date_stages: Vec<Box<dyn Transformer>>,
    time_stages: Vec<Box<dyn Transformer>>,
    set_pos: Option<BySetPos>,
    max_empty_years: u16,
    /// A part lost every value to sanitizing, so nothing can match
    starved: bool,
}

impl Plan {
    fn new(
        recur: &Recur,
        seed: &Temporal,
        window: Option<&Period>,
        config: &ExpandConfig,
    ) -> Result<Self, RecurError> {
        let violations = validate_with_seed(recur, seed);
        let (errors, warnings): (Vec<_>, Vec<_>) = violations
            .into_iter()
            .partition(|v| v.severity(config.strictness) == Severity::Error);
        if !errors.is_empty() {
            return Err(RecurError::InvalidRecurrenceSpec { violations: errors });
        }

        if recur.bound.is_none() && window.is_none() {
            return Err(RecurError::UnboundedExpansion);
        }

        if seed.is_date() && recur.freq.is_sub_daily() {
            let field = match recur.freq {
                Frequency::Secondly => Field::Second,
                Frequency::Minutely => Field::Minute,
                _ => Field::Hour,
            };
            return Err(RecurError::TypeMismatch {
                field,
                kind: seed.kind(),
            });
        }

        let mut rule = recur.clone();
        let starved = sanitize(&mut rule, &warnings);
        add_implicit_parts(&mut rule, seed);
        tracing::debug!(effective = %rule, "planned rule");

        let (time_stages, date_stages): (Vec<_>, Vec<_>) =
            transform::pipeline(&rule, config.strictness)
                .into_iter()
                .partition(|stage| stage.part().is_time());
        let set_pos = (!rule.by_set_pos.is_empty()).then(|| BySetPos::new(&rule.by_set_pos));

        Ok(Self {
            until: rule.until().cloned(),
            count: rule.count(),
            seed: seed.clone(),
            date_stages,
            time_stages,
            set_pos,
            max_empty_years: config.max_empty_years,
            starved,
            rule,
        })
    }

    fn run(&self, window: Option<&Period>) -> Result<Expansion, RecurError> {
        let mut out = Emitter::new(self, window);
        if self.count == Some(0) {
            return Ok(out.finish(Termination::CountExhausted));
        }
        if self.starved {
            tracing::warn!("a rule part has no valid value left, nothing to expand");
            return Ok(out.finish(Termination::WindowExhausted));
        }

        // without COUNT nothing before the window needs to be seen
        let mut k = match window {
            Some(window) if self.count.is_none() => self.period_before(window.start())?,
            _ => 0,
        };
        let mut horizon = Horizon::new(self.max_empty_years);
        loop {
            let (base, candidate, start) = match self.period(k) {
                Ok(period) => period,
                Err(RecurError::Calendar(err)) => {
                    tracing::warn!(%err, period = k, "reached the end of the supported range");
                    return Ok(out.finish(Termination::WindowExhausted));
                }
                Err(err) => return Err(err),
            };

            if let Some(until) = &self.until
                && start.cmp_loose(until) == Ordering::Greater
            {
                return Ok(out.finish(Termination::UntilExceeded));
            }
            if let Some(window) = window
                && start.cmp_loose(window.end()) != Ordering::Less
            {
                return Ok(out.finish(Termination::WindowExhausted));
            }

            // a day the date parts reject has no occurrence at any time
            if self.rule.freq.is_sub_daily()
                && self.narrow_dates(vec![candidate.clone()])?.is_empty()
            {
                horizon.record(base.date(), false);
                if horizon.exhausted(base.date()) {
                    return Ok(out.finish(horizon.give_up()));
                }
                k = match self.first_period_after(&base, k) {
                    Ok(next) => next,
                    Err(RecurError::Calendar(err)) => {
                        tracing::warn!(%err, period = k, "reached the end of the supported range");
                        return Ok(out.finish(Termination::WindowExhausted));
                    }
                    Err(err) => return Err(err),
                };
                continue;
            }

            let occurrences = self.expand_period(candidate)?;
            horizon.record(base.date(), !occurrences.is_empty());
            for occurrence in occurrences {
                if let Some(termination) = out.push(occurrence) {
                    return Ok(out.finish(termination));
                }
            }
            if horizon.exhausted(base.date()) {
                return Ok(out.finish(horizon.give_up()));
            }
            k += 1;
        }
    }

    /// Base value, initial candidate and earliest possible instant of period
    /// `k`.
    ///
    /// The base is computed from the seed every time. Accumulating steps
    /// would let month-end clamping drift, 31st to 28th and never back.
    fn period(&self, k: i64) -> Result<(Temporal, Candidate, Temporal), RecurError> {
        let freq = self.rule.freq;
        let n = k.saturating_mul(i64::from(self.rule.interval));
        let span = freq.span(n)?;

        if freq.is_sub_daily() {
            let base = self.seed.checked_add(span)?;
            let candidate = Candidate::day(base.clone());
            return Ok((base.clone(), candidate, base));
        }

        let date = self.seed.date().checked_add(span)?;
        let base = self.seed.with_date(date)?;
        let (first, last, scope) = match freq {
            Frequency::Yearly => (date.first_of_year(), date.last_of_year(), Scope::Year),
            Frequency::Monthly => (date.first_of_month(), date.last_of_month(), Scope::Month),
            Frequency::Weekly => {
                let first = start_of_week(date, self.rule.wkst.into())?;
                (first, first.checked_add(6.days())?, Scope::Week)
            }
            _ => (date, date, Scope::Day),
        };

        // week 1 may begin in December of the year before
        let earliest = match freq {
            Frequency::Yearly if !self.rule.by_week_no.is_empty() => {
                first_week_start(date.year(), self.rule.wkst.into())?.min(first)
            }
            _ => first,
        };
        let start = base.with_civil(earliest.to_datetime(Time::midnight()))?;
        let candidate = Candidate::range(&base, first, last, scope)?;
        Ok((base, candidate, start))
    }

    fn narrow_dates(&self, mut candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError> {
        for stage in &self.date_stages {
            candidates = stage.apply(candidates)?;
            tracing::trace!(part = %stage.part(), remaining = candidates.len(), "applied");
            if candidates.is_empty() {
                break;
            }
        }
        Ok(candidates)
    }

    /// Run the pipeline over one period.
    fn expand_period(&self, candidate: Candidate) -> Result<Vec<Temporal>, RecurError> {
        let mut candidates = Vec::new();
        for c in self.narrow_dates(vec![candidate])? {
            candidates.extend(c.into_days()?);
        }
        for stage in &self.time_stages {
            candidates = stage.apply(candidates)?;
            tracing::trace!(part = %stage.part(), remaining = candidates.len(), "applied");
        }

        candidates.sort_by(|a, b| a.value.cmp(&b.value));
        candidates.dedup_by(|a, b| a.value == b.value);
        if let Some(set_pos) = &self.set_pos {
            candidates = set_pos.apply(candidates)?;
        }

        Ok(candidates
            .into_iter()
            .map(|c| c.value)
            .filter(|v| *v >= self.seed)
            .collect())
    }

    /// The first sub-daily period that starts on the day after `base`.
    fn first_period_after(&self, base: &Temporal, k: i64) -> Result<i64, RecurError> {
        let next_day = base.date().tomorrow()?.to_datetime(Time::midnight());
        let next_day = base.with_civil(next_day)?;
        let elapsed = seconds_between(&self.seed, &next_day);
        let unit = match self.rule.freq {
            Frequency::Secondly => 1,
            Frequency::Minutely => 60,
            _ => 3600,
        };
        let step = unit * i64::from(self.rule.interval);
        let next = (elapsed + step - 1) / step;
        Ok(next.max(k + 1))
    }

    /// A period that starts before `target`, late enough to skip the bulk of
    /// the periods in between. One period of slack is left for a day carried
    /// over by SKIP=FORWARD.
    fn period_before(&self, target: &Temporal) -> Result<i64, RecurError> {
        let (from, to) = (self.seed.date(), target.date());
        let units = match self.rule.freq {
            Frequency::Secondly => seconds_between(&self.seed, target),
            Frequency::Minutely => seconds_between(&self.seed, target) / 60,
            Frequency::Hourly => seconds_between(&self.seed, target) / 3600,
            Frequency::Daily => i64::from(from.until(to)?.get_days()),
            Frequency::Weekly => i64::from(from.until(to)?.get_days()) / 7,
            Frequency::Monthly => {
                12 * (i64::from(to.year()) - i64::from(from.year()))
                    + i64::from(to.month())
                    - i64::from(from.month())
            }
            Frequency::Yearly => i64::from(to.year()) - i64::from(from.year()),
        };

        let mut k = units.div_euclid(i64::from(self.rule.interval.max(1))).max(0);
        while k > 0 && self.period(k)?.2.cmp_loose(target) == Ordering::Greater {
            k -= 1;
        }
        tracing::debug!(period = k, "fast-forwarded to the window");
        Ok((k - 1).max(0))
    }
}

/// Seconds from `a` to `b`, by the clock for values without an instant.
fn seconds_between(a: &Temporal, b: &Temporal) -> i64 {
    match (a, b) {
        (Temporal::Zoned(a), Temporal::Zoned(b)) => b.duration_since(a).as_secs(),
        (Temporal::Utc(_) | Temporal::Zoned(_), Temporal::Utc(_) | Temporal::Zoned(_)) => b
            .to_utc()
            .civil()
            .duration_since(a.to_utc().civil())
            .as_secs(),
        _ => b.civil().duration_since(a.civil()).as_secs(),
    }
}

/// Applies COUNT, UNTIL and the window to the occurrences in order.
struct Emitter<'a> {
    plan: &'a Plan,
    window: Option<&'a Period>,
    occurrences: Vec<Temporal>,
    produced: u32,
    last: Option<Temporal>,
}

impl<'a> Emitter<'a> {
    fn new(plan: &'a Plan, window: Option<&'a Period>) -> Self {
        Self {
            plan,
            window,
            occurrences: Vec::new(),
            produced: 0,
            last: None,
        }
    }

    /// Take one occurrence. Returns the terminal state once one is reached.
    fn push(&mut self, occurrence: Temporal) -> Option<Termination> {
        // skipped days can land on a day the next period yields again
        if self.last.as_ref().is_some_and(|last| occurrence <= *last) {
            return None;
        }

        if let Some(until) = &self.plan.until
            && occurrence.cmp_loose(until) == Ordering::Greater
        {
            return Some(Termination::UntilExceeded);
        }

        let position = self.window.map(|w| w.position(&occurrence));
        if self.plan.count.is_none() && position == Some(RangePosition::Before) {
            return None;
        }

        self.produced += 1;
        self.last = Some(occurrence.clone());
        match position {
            Some(RangePosition::Before) => {}
            None | Some(RangePosition::InRange) => self.occurrences.push(occurrence),
            Some(RangePosition::After | RangePosition::InvalidRange) => {
                return Some(Termination::WindowExhausted);
            }
        }

        match self.plan.count {
            Some(count) if self.produced >= count => Some(Termination::CountExhausted),
            _ => None,
        }
    }

    fn finish(self, termination: Termination) -> Expansion {
        tracing::debug!(count = self.occurrences.len(), %termination, "expansion finished");
        Expansion {
            occurrences: self.occurrences,
            termination,
        }
    }
}

/// Tracks how long the rule went without an occurrence, in calendar time so
/// that every frequency gets the same allowance.
#[derive(Debug)]
struct Horizon {
    years: u16,
    /// Set by the first period seen, moved on by every hit
    deadline: Option<Date>,
}

impl Horizon {
    const fn new(years: u16) -> Self {
        Self {
            years,
            deadline: None,
        }
    }

    fn record(&mut self, date: Date, produced: bool) {
        if produced || self.deadline.is_none() {
            // no deadline past the supported range, the calendar ends first
            self.deadline = date.checked_add(i64::from(self.years).years()).ok();
        }
    }

    fn exhausted(&self, date: Date) -> bool {
        self.deadline.is_some_and(|deadline| date >= deadline)
    }

    fn give_up(&self) -> Termination {
        tracing::warn!(years = self.years, "rule keeps producing nothing, giving up");
        Termination::WindowExhausted
    }
}

/// Remove what the warnings let the engine skip. Returns whether some part
/// lost all of its values, in which case the rule cannot match anything.
fn sanitize(rule: &mut Recur, warnings: &[Violation]) -> bool {
    let mut starved = false;
    for violation in warnings {
        tracing::warn!(%violation, "ignoring");
        match violation {
            Violation::NotApplicable { part, .. } => clear(rule, *part),
            Violation::ZeroInterval => rule.interval = 1,
            Violation::OrdinalNotAllowed { day, .. } => {
                for d in &mut rule.by_day {
                    if *d == *day {
                        *d = WeekDayNum::every(d.day);
                    }
                }
            }
            Violation::OutOfRange { part, value } => {
                let before = part.is_set(rule);
                drop_value(rule, *part, *value);
                starved |= before && !part.is_set(rule);
            }
            Violation::UntilKindMismatch { .. } => {}
        }
    }
    starved
}

fn clear(rule: &mut Recur, part: RulePart) {
    match part {
        RulePart::ByMonth => rule.by_month.clear(),
        RulePart::ByWeekNo => rule.by_week_no.clear(),
        RulePart::ByYearDay => rule.by_year_day.clear(),
        RulePart::ByMonthDay => rule.by_month_day.clear(),
        RulePart::ByDay => rule.by_day.clear(),
        RulePart::ByHour => rule.by_hour.clear(),
        RulePart::ByMinute => rule.by_minute.clear(),
        RulePart::BySecond => rule.by_second.clear(),
        RulePart::BySetPos => rule.by_set_pos.clear(),
    }
}

fn drop_value(rule: &mut Recur, part: RulePart, value: i32) {
    match part {
        RulePart::ByMonth => rule.by_month.retain(|v| i32::from(*v) != value),
        RulePart::ByWeekNo => rule.by_week_no.retain(|v| i32::from(*v) != value),
        RulePart::ByYearDay => rule.by_year_day.retain(|v| i32::from(*v) != value),
        RulePart::ByMonthDay => rule.by_month_day.retain(|v| i32::from(*v) != value),
        RulePart::ByDay => rule
            .by_day
            .retain(|d| d.occurrence.map(i32::from) != Some(value)),
        RulePart::ByHour => rule.by_hour.retain(|v| i32::from(*v) != value),
        RulePart::ByMinute => rule.by_minute.retain(|v| i32::from(*v) != value),
        RulePart::BySecond => rule.by_second.retain(|v| i32::from(*v) != value),
        RulePart::BySetPos => rule.by_set_pos.retain(|v| i32::from(*v) != value),
    }
}

/// Fill in what the rule leaves to DTSTART, RFC 5545 Section 3.3.10.
fn add_implicit_parts(rule: &mut Recur, seed: &Temporal) {
    let day = seed.date();
    match rule.freq {
        Frequency::Yearly
            if rule.by_week_no.is_empty()
                && rule.by_year_day.is_empty()
                && rule.by_month_day.is_empty()
                && rule.by_day.is_empty() =>
        {
            rule.by_month_day = vec![day.day()];
            if rule.by_month.is_empty() {
                rule.by_month = vec![day.month().unsigned_abs()];
            }
        }
        Frequency::Monthly if rule.by_month_day.is_empty() && rule.by_day.is_empty() => {
            rule.by_month_day = vec![day.day()];
        }
        Frequency::Weekly if rule.by_day.is_empty() => {
            rule.by_day = vec![WeekDayNum::every(day.weekday().into())];
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};

    use super::*;
    use crate::config::Strictness;

    fn floating(y: i16, m: i8, d: i8, h: i8) -> Temporal {
        Temporal::Floating(datetime(y, m, d, h, 0, 0, 0))
    }

    fn expand(rule: &str, seed: &Temporal) -> Expansion {
        let rule: Recur = rule.parse().unwrap();
        rule.expand(seed, None, &ExpandConfig::default()).unwrap()
    }

    #[test]
    fn counts_daily_across_month_end() {
        let e = expand("FREQ=DAILY;COUNT=3", &Temporal::Date(date(2024, 1, 31)));
        assert_eq!(
            e.occurrences,
            vec![
                Temporal::Date(date(2024, 1, 31)),
                Temporal::Date(date(2024, 2, 1)),
                Temporal::Date(date(2024, 2, 2)),
            ]
        );
        assert_eq!(e.termination, Termination::CountExhausted);
    }

    #[test]
    fn zero_count_is_empty() {
        let e = expand("FREQ=DAILY;COUNT=0", &floating(2024, 1, 1, 9));
        assert!(e.occurrences.is_empty());
        assert_eq!(e.termination, Termination::CountExhausted);
    }

    #[test]
    fn monthly_on_31st_skips_short_months() {
        let e = expand("FREQ=MONTHLY;COUNT=4", &floating(2024, 1, 31, 9));
        let dates: Vec<_> = e.occurrences.iter().map(Temporal::date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 31), date(2024, 3, 31), date(2024, 5, 31), date(2024, 7, 31)]
        );
    }

    #[test]
    fn stops_at_until() {
        let rule = "FREQ=DAILY;UNTIL=20240103T090000";
        let e = expand(rule, &floating(2024, 1, 1, 9));
        assert_eq!(e.occurrences.len(), 3);
        assert_eq!(e.termination, Termination::UntilExceeded);
    }

    #[test]
    fn refuses_unbounded_rule() {
        let rule: Recur = "FREQ=DAILY".parse().unwrap();
        let err = rule
            .expand(&floating(2024, 1, 1, 9), None, &ExpandConfig::default())
            .unwrap_err();
        assert!(matches!(err, RecurError::UnboundedExpansion));
    }

    #[test]
    fn refuses_date_seed_below_a_day() {
        let rule: Recur = "FREQ=HOURLY;COUNT=3".parse().unwrap();
        let err = rule
            .expand(&Temporal::Date(date(2024, 1, 1)), None, &ExpandConfig::default())
            .unwrap_err();
        assert!(matches!(err, RecurError::TypeMismatch { field: Field::Hour, .. }));
    }

    #[test]
    fn gives_up_on_impossible_rule() {
        let config = ExpandConfig {
            max_empty_years: 10,
            ..ExpandConfig::default()
        };
        let rule: Recur = "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=30;COUNT=1".parse().unwrap();
        let e = rule.expand(&floating(2024, 1, 1, 9), None, &config).unwrap();
        assert!(e.occurrences.is_empty());
        assert_eq!(e.termination, Termination::WindowExhausted);
    }

    #[test]
    fn sub_daily_skips_rejected_days() {
        // only Mondays, hourly from 09:00 on a Saturday
        let e = expand("FREQ=HOURLY;INTERVAL=5;BYDAY=MO;COUNT=3", &floating(2024, 1, 6, 9));
        let times: Vec<_> = e.occurrences.iter().map(Temporal::civil).collect();
        // 09:00 Saturday + 5h steps reaches Monday at 01:00
        assert_eq!(
            times,
            vec![
                datetime(2024, 1, 8, 1, 0, 0, 0),
                datetime(2024, 1, 8, 6, 0, 0, 0),
                datetime(2024, 1, 8, 11, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn skips_whole_days_when_intervals_miss() {
        let config = ExpandConfig {
            max_empty_years: 1,
            ..ExpandConfig::default()
        };
        // 09:00 + n*24h never hits 03:00
        let rule: Recur = "FREQ=HOURLY;INTERVAL=24;BYHOUR=3;COUNT=1".parse().unwrap();
        let e = rule.expand(&floating(2024, 1, 1, 9), None, &config).unwrap();
        assert!(e.occurrences.is_empty());
        assert_eq!(e.termination, Termination::WindowExhausted);
    }

    #[test]
    fn sanitizes_per_strictness() {
        let rule: Recur = "FREQ=MONTHLY;BYMONTHDAY=0,15;COUNT=2".parse().unwrap();
        let seed = floating(2024, 1, 1, 9);

        let e = rule.expand(&seed, None, &ExpandConfig::default()).unwrap();
        let dates: Vec<_> = e.occurrences.iter().map(Temporal::date).collect();
        assert_eq!(dates, vec![date(2024, 1, 15), date(2024, 2, 15)]);

        let strict = ExpandConfig::with_strictness(Strictness::Strict);
        let err = rule.expand(&seed, None, &strict).unwrap_err();
        assert!(matches!(err, RecurError::InvalidRecurrenceSpec { .. }));
    }

    #[test]
    fn rule_without_valid_values_yields_nothing() {
        let rule: Recur = "FREQ=MONTHLY;BYMONTHDAY=45;COUNT=2".parse().unwrap();
        let e = rule
            .expand(&floating(2024, 1, 1, 9), None, &ExpandConfig::default())
            .unwrap();
        assert!(e.occurrences.is_empty());
    }

    #[test]
    fn relaxed_ignores_inapplicable_parts() {
        let rule: Recur = "FREQ=WEEKLY;BYWEEKNO=10;INTERVAL=0;COUNT=2".parse().unwrap();
        let seed = floating(2024, 1, 1, 9);
        assert!(rule.expand(&seed, None, &ExpandConfig::default()).is_err());

        let relaxed = ExpandConfig::with_strictness(Strictness::Relaxed);
        let e = rule.expand(&seed, None, &relaxed).unwrap();
        let dates: Vec<_> = e.occurrences.iter().map(Temporal::date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8)]);
    }

    #[test]
    fn fills_implicit_parts_from_seed() {
        let mut rule = Recur::new(Frequency::Yearly);
        add_implicit_parts(&mut rule, &Temporal::Date(date(2024, 3, 10)));
        assert_eq!(rule.by_month, vec![3]);
        assert_eq!(rule.by_month_day, vec![10]);

        let mut rule = Recur::builder(Frequency::Yearly).by_month([6, 7]).build();
        add_implicit_parts(&mut rule, &Temporal::Date(date(2024, 3, 10)));
        assert_eq!(rule.by_month, vec![6, 7]);
        assert_eq!(rule.by_month_day, vec![10]);

        let mut rule = Recur::new(Frequency::Weekly);
        add_implicit_parts(&mut rule, &Temporal::Date(date(2024, 3, 10)));
        assert_eq!(rule.by_day, vec![WeekDayNum::every(crate::rrule::WeekDay::Sunday)]);
    }
}
