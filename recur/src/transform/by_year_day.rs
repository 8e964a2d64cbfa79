// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Date;

use crate::error::RecurError;
use crate::rrule::Skip;
use crate::transform::{Action, Candidate, Context, RulePart, Transformer, resolve_index};

#[derive(Debug)]
pub(crate) struct ByYearDay {
    days: Vec<i32>,
    action: Action,
    skip: Skip,
}

impl ByYearDay {
    pub fn new(days: &[i16], action: Action, ctx: Context) -> Self {
        Self {
            days: days.iter().map(|d| i32::from(*d)).collect(),
            action,
            skip: ctx.skip,
        }
    }

    fn matches(&self, date: Date) -> bool {
        let len = i32::from(date.days_in_year());
        let doy = i32::from(date.day_of_year());
        self.days
            .iter()
            .any(|v| resolve_index(*v, len) == Some(doy))
    }

    fn expand(&self, c: &Candidate, out: &mut Vec<Candidate>) -> Result<(), RecurError> {
        let last = c.last;
        for year_start in c
            .first
            .first_of_year()
            .series(1.year())
            .take_while(|y| *y <= last)
        {
            let year_end = year_start.last_of_year();
            let len = i32::from(year_start.days_in_year());
            let whole = c.contains(year_start) && c.contains(year_end);
            for &v in &self.days {
                match resolve_index(v, len) {
                    Some(n) => {
                        let date = year_start.checked_add((n - 1).days())?;
                        if c.contains(date) {
                            out.push(c.on(date)?);
                        }
                    }
                    None if v > 0 && whole && self.skip != Skip::Omit => {
                        let date = match self.skip {
                            Skip::Backward => year_end,
                            _ => year_end.tomorrow()?,
                        };
                        tracing::debug!(year = year_start.year(), day = v, %date, "year day overflow, skipping to");
                        out.push(c.on(date)?);
                    }
                    None => {
                        tracing::debug!(year = year_start.year(), day = v, "year day not in year, skipping");
                    }
                }
            }
        }
        Ok(())
    }
}

impl Transformer for ByYearDay {
    fn part(&self) -> RulePart {
        RulePart::ByYearDay
    }

    fn apply(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError> {
        let mut out = Vec::new();
        for c in candidates {
            match self.action {
                Action::Expand => self.expand(&c, &mut out)?,
                _ => out.extend(c.restrict(|d| self.matches(d))?),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::config::Strictness;
    use crate::rrule::{Frequency, Recur};
    use crate::temporal::Temporal;
    use crate::transform::Scope;

    fn year(y: i16) -> Candidate {
        let base = Temporal::Date(date(y, 1, 1));
        Candidate::range(&base, date(y, 1, 1), date(y, 12, 31), Scope::Year).unwrap()
    }

    fn stage(days: &[i16], skip: Skip) -> ByYearDay {
        let rule = Recur::builder(Frequency::Yearly).skip(skip).build();
        ByYearDay::new(days, Action::Expand, Context::new(&rule, Strictness::Lenient))
    }

    fn dates(out: &[Candidate]) -> Vec<Date> {
        out.iter().map(|c| c.value.date()).collect()
    }

    #[test]
    fn expands_from_both_ends() {
        let out = stage(&[1, 100, -1], Skip::Omit).apply(vec![year(2024)]).unwrap();
        assert_eq!(
            dates(&out),
            vec![date(2024, 1, 1), date(2024, 4, 9), date(2024, 12, 31)]
        );
    }

    #[test]
    fn day_366_only_in_leap_years() {
        let out = stage(&[366], Skip::Omit).apply(vec![year(2023), year(2024)]).unwrap();
        assert_eq!(dates(&out), vec![date(2024, 12, 31)]);
    }

    #[test]
    fn skips_overflow_by_direction() {
        let out = stage(&[366], Skip::Backward).apply(vec![year(2023)]).unwrap();
        assert_eq!(dates(&out), vec![date(2023, 12, 31)]);

        let out = stage(&[366], Skip::Forward).apply(vec![year(2023)]).unwrap();
        assert_eq!(dates(&out), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn limits_days() {
        let rule = Recur::new(Frequency::Hourly);
        let stage = ByYearDay::new(&[-1], Action::Limit, Context::new(&rule, Strictness::Lenient));
        let keep = Candidate::day(Temporal::Date(date(2023, 12, 31)));
        let drop = Candidate::day(Temporal::Date(date(2023, 12, 30)));
        let out = stage.apply(vec![keep, drop]).unwrap();
        assert_eq!(dates(&out), vec![date(2023, 12, 31)]);
    }
}
