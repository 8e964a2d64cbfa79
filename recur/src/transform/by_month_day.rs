// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Date;

use crate::error::RecurError;
use crate::rrule::Skip;
use crate::transform::{Action, Candidate, Context, RulePart, Transformer, resolve_index};

#[derive(Debug)]
pub(crate) struct ByMonthDay {
    days: Vec<i32>,
    action: Action,
    skip: Skip,
}

impl ByMonthDay {
    pub fn new(days: &[i8], action: Action, ctx: Context) -> Self {
        Self {
            days: days.iter().map(|d| i32::from(*d)).collect(),
            action,
            skip: ctx.skip,
        }
    }

    fn matches(&self, date: Date) -> bool {
        let len = i32::from(date.days_in_month());
        let day = i32::from(date.day());
        self.days.iter().any(|v| resolve_index(*v, len) == Some(day))
    }

    fn expand(&self, c: &Candidate, out: &mut Vec<Candidate>) -> Result<(), RecurError> {
        let last = c.last;
        for month_start in c
            .first
            .first_of_month()
            .series(1.month())
            .take_while(|m| *m <= last)
        {
            let month_end = month_start.last_of_month();
            let len = i32::from(month_start.days_in_month());
            let whole = c.contains(month_start) && c.contains(month_end);
            for &v in &self.days {
                match resolve_index(v, len) {
                    Some(n) => {
                        let date = month_start.checked_add((n - 1).days())?;
                        if c.contains(date) {
                            out.push(c.on(date)?);
                        }
                    }
                    None if v > 0 && whole && self.skip != Skip::Omit => {
                        let date = match self.skip {
                            Skip::Backward => month_end,
                            _ => month_end.tomorrow()?,
                        };
                        tracing::debug!(month = %month_start, day = v, %date, "month day overflow, skipping to");
                        out.push(c.on(date)?);
                    }
                    None => {
                        tracing::debug!(month = %month_start, day = v, "month day not in month, skipping");
                    }
                }
            }
        }
        Ok(())
    }
}

impl Transformer for ByMonthDay {
    fn part(&self) -> RulePart {
        RulePart::ByMonthDay
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
