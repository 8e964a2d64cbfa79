// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Weekday;

use crate::error::RecurError;
use crate::temporal::week::nth_week_start;
use crate::transform::{Candidate, Context, RulePart, Scope, Transformer};

/// Expands a year into its numbered weeks. Only YEARLY rules get here.
#[derive(Debug)]
pub(crate) struct ByWeekNo {
    weeks: Vec<i8>,
    wkst: Weekday,
}

impl ByWeekNo {
    pub fn new(weeks: &[i8], ctx: Context) -> Self {
        Self {
            weeks: weeks.to_vec(),
            wkst: ctx.wkst,
        }
    }
}

impl Transformer for ByWeekNo {
    fn part(&self) -> RulePart {
        RulePart::ByWeekNo
    }

    fn apply(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError> {
        let mut out = Vec::new();
        for c in candidates {
            let year = c.first.year();
            for &week in &self.weeks {
                let Some(start) = nth_week_start(year, week, self.wkst)? else {
                    tracing::debug!(year, week, "week number not in year, skipping");
                    continue;
                };
                let end = start.checked_add(6.days())?;

                // whole weeks for a year, weeks clipped to the month after BYMONTH
                let (first, last) = match c.scope {
                    Scope::Year => (start, end),
                    _ => (start.max(c.first), end.min(c.last)),
                };
                if first <= last {
                    out.push(Candidate::range(&c.value, first, last, Scope::Week)?);
                }
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

    fn ctx() -> Context {
        Context::new(&Recur::new(Frequency::Yearly), Strictness::Lenient)
    }

    #[test]
    fn expands_weeks_across_year_boundary() {
        let base = Temporal::Date(date(1997, 5, 12));
        let year = Candidate::range(&base, date(1997, 1, 1), date(1997, 12, 31), Scope::Year).unwrap();

        let out = ByWeekNo::new(&[1, 20, -1], ctx()).apply(vec![year]).unwrap();
        let ranges: Vec<_> = out.iter().map(|c| (c.first, c.last)).collect();
        assert_eq!(
            ranges,
            vec![
                (date(1996, 12, 30), date(1997, 1, 5)),
                (date(1997, 5, 12), date(1997, 5, 18)),
                (date(1997, 12, 22), date(1997, 12, 28)),
            ]
        );
    }

    #[test]
    fn skips_missing_week_53() {
        let base = Temporal::Date(date(2021, 1, 1));
        let year = Candidate::range(&base, date(2021, 1, 1), date(2021, 12, 31), Scope::Year).unwrap();
        assert!(ByWeekNo::new(&[53], ctx()).apply(vec![year]).unwrap().is_empty());
    }

    #[test]
    fn clips_weeks_to_month() {
        let base = Temporal::Date(date(1997, 1, 1));
        let january = Candidate::range(&base, date(1997, 1, 1), date(1997, 1, 31), Scope::Month).unwrap();
        let out = ByWeekNo::new(&[1], ctx()).apply(vec![january]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].first, out[0].last), (date(1997, 1, 1), date(1997, 1, 5)));
    }
}
