// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Week numbering relative to a week start day.
//!
//! Week 1 of a year is the first week that holds at least four days of that
//! year, RFC 5545 Section 3.3.10. With a Monday week start this is ISO 8601.

use jiff::civil::{Date, Weekday};
use jiff::ToSpan;

/// First day of the week containing `date`.
///
/// ## Errors
/// If the week starts before the supported range.
pub fn start_of_week(date: Date, wkst: Weekday) -> Result<Date, jiff::Error> {
    let back = date.weekday().since(wkst);
    date.checked_sub(i32::from(back).days())
}

/// First day of week 1 of `year`, which may fall in the previous year.
///
/// ## Errors
/// If `year` is outside the supported range.
pub fn first_week_start(year: i16, wkst: Weekday) -> Result<Date, jiff::Error> {
    // the week holding January 4th always has four days in the year
    start_of_week(Date::new(year, 1, 4)?, wkst)
}

/// Number of weeks in `year`, 52 or 53.
///
/// ## Errors
/// If `year` is outside the supported range.
pub fn weeks_in_year(year: i16, wkst: Weekday) -> Result<i8, jiff::Error> {
    let start = first_week_start(year, wkst)?;
    let next = first_week_start(year.saturating_add(1), wkst)?;
    let days = start.until(next)?.get_days();
    Ok(if days > 364 { 53 } else { 52 })
}

/// First day of week `week` of `year`. Negative weeks count from the end,
/// -1 being the last week. Returns `None` when the year has no such week.
///
/// ## Errors
/// If `year` is outside the supported range.
pub fn nth_week_start(year: i16, week: i8, wkst: Weekday) -> Result<Option<Date>, jiff::Error> {
    let total = weeks_in_year(year, wkst)?;
    let n = if week < 0 { total + 1 + week } else { week };
    if n < 1 || n > total {
        return Ok(None);
    }

    let start = first_week_start(year, wkst)?.checked_add((i32::from(n) - 1).weeks())?;
    Ok(Some(start))
}
