// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Weekday};

use crate::error::RecurError;
use crate::rrule::{Frequency, WeekDayNum};
use crate::transform::{Action, Candidate, Context, RulePart, Scope, Transformer};

/// What an ordinal such as `-1FR` counts within when limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Month,
    Year,
}

impl Frame {
    /// Position of `date` among the same weekdays of its frame, counted from
    /// the start and from the end.
    fn positions(self, date: Date) -> (i32, i32) {
        let (index, len) = match self {
            Frame::Month => (i32::from(date.day()), i32::from(date.days_in_month())),
            Frame::Year => (i32::from(date.day_of_year()), i32::from(date.days_in_year())),
        };
        ((index - 1) / 7 + 1, -((len - index) / 7 + 1))
    }
}

#[derive(Debug)]
pub(crate) struct ByDay {
    days: Vec<(Weekday, Option<i8>)>,
    action: Action,
    frame: Option<Frame>,
}

impl ByDay {
    pub fn new(days: &[WeekDayNum], action: Action, ctx: Context) -> Self {
        let frame = match ctx.freq {
            Frequency::Monthly => Some(Frame::Month),
            Frequency::Yearly if ctx.has_by_month => Some(Frame::Month),
            Frequency::Yearly => Some(Frame::Year),
            _ => None,
        };
        Self {
            days: days.iter().map(|d| (d.day.into(), d.occurrence)).collect(),
            action,
            frame,
        }
    }

    fn matches(&self, date: Date) -> bool {
        let weekday = date.weekday();
        self.days.iter().any(|(day, occurrence)| {
            *day == weekday
                && match (occurrence, self.frame) {
                    (Some(n), Some(frame)) => {
                        let (from_start, from_end) = frame.positions(date);
                        i32::from(*n) == from_start || i32::from(*n) == from_end
                    }
                    _ => true,
                }
        })
    }

    fn expand(&self, c: &Candidate, out: &mut Vec<Candidate>) -> Result<(), RecurError> {
        for &(day, occurrence) in &self.days {
            let matching: Vec<Date> = c.days().filter(|d| d.weekday() == day).collect();
            match occurrence {
                Some(n) if matches!(c.scope, Scope::Month | Scope::Year) => {
                    let index = if n > 0 {
                        usize::try_from(n - 1).ok()
                    } else {
                        usize::try_from(-n).ok().and_then(|k| matching.len().checked_sub(k))
                    };
                    match index.and_then(|i| matching.get(i)) {
                        Some(date) => out.push(c.on(*date)?),
                        None => tracing::debug!(%n, ?day, first = %c.first, "no such weekday in period, skipping"),
                    }
                }
                // ordinals mean nothing within a week
                _ => {
                    for date in matching {
                        out.push(c.on(date)?);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Transformer for ByDay {
    fn part(&self) -> RulePart {
        RulePart::ByDay
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
