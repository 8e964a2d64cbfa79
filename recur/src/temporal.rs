// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporal values in the flavors RFC 5545 knows: DATE, floating DATE-TIME,
//! UTC DATE-TIME and DATE-TIME bound to a time zone.
//!
//! Every operation returns a new value. Nothing here mutates in place, so a
//! [`Temporal`] can be shared freely between threads.

pub mod week;

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::tz::TimeZone;
use jiff::{Span, ToSpan, Zoned};

use crate::error::RecurError;
use crate::keyword::KW_TZID;

/// Fields of a temporal value that rule parts read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[expect(missing_docs)]
pub enum Field {
    Second,
    Minute,
    Hour,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    Month,
    Year,
}

impl Field {
    /// Whether the field lives below the day, i.e. DATE values lack it.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, Field::Second | Field::Minute | Field::Hour)
    }
}

/// The kind of a [`Temporal`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TemporalKind {
    /// Calendar date
    #[strum(serialize = "DATE")]
    Date,

    /// Date-time without zone
    #[strum(serialize = "floating DATE-TIME")]
    Floating,

    /// Date-time in UTC
    #[strum(serialize = "UTC DATE-TIME")]
    Utc,

    /// Date-time bound to a time zone
    #[strum(serialize = "zoned DATE-TIME")]
    Zoned,
}

/// A point in time as iCalendar sees it.
#[derive(Debug, Clone)]
pub enum Temporal {
    /// DATE value, no time of day.
    Date(Date),

    /// Floating DATE-TIME, interpreted in whatever zone the reader is in.
    Floating(DateTime),

    /// DATE-TIME with the `Z` suffix, the civil time is in UTC.
    Utc(DateTime),

    /// DATE-TIME with a TZID.
    Zoned(Zoned),
}

impl Temporal {
    /// Bind a civil date-time to the IANA time zone `tzid`.
    ///
    /// ## Errors
    /// If the zone is unknown or the date-time cannot be placed in it.
    pub fn zoned(dt: DateTime, tzid: &str) -> Result<Self, RecurError> {
        let tz = TimeZone::get(tzid).map_err(|_| RecurError::UnknownTimeZone {
            name: tzid.to_string(),
        })?;
        Ok(Self::Zoned(dt.to_zoned(tz)?))
    }

    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Temporal::Date(_) => TemporalKind::Date,
            Temporal::Floating(_) => TemporalKind::Floating,
            Temporal::Utc(_) => TemporalKind::Utc,
            Temporal::Zoned(_) => TemporalKind::Zoned,
        }
    }

    /// Whether this is a DATE value.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Temporal::Date(_))
    }

    /// Whether this value denotes a UTC time.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        match self {
            Temporal::Utc(_) => true,
            Temporal::Zoned(z) => z.time_zone().iana_name() == Some("UTC"),
            Temporal::Date(_) | Temporal::Floating(_) => false,
        }
    }

    /// The IANA name of the zone, for zoned values.
    #[must_use]
    pub fn tz_name(&self) -> Option<&str> {
        match self {
            Temporal::Zoned(z) => z.time_zone().iana_name(),
            _ => None,
        }
    }

    /// The calendar date, in the value's own zone.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            Temporal::Date(d) => *d,
            Temporal::Floating(dt) | Temporal::Utc(dt) => dt.date(),
            Temporal::Zoned(z) => z.date(),
        }
    }

    /// The civil date-time, in the value's own zone. DATE values are promoted
    /// to midnight.
    #[must_use]
    pub fn civil(&self) -> DateTime {
        match self {
            Temporal::Date(d) => d.to_datetime(Time::midnight()),
            Temporal::Floating(dt) | Temporal::Utc(dt) => *dt,
            Temporal::Zoned(z) => z.datetime(),
        }
    }

    /// Read a field. Time fields of a DATE read as midnight.
    #[must_use]
    pub fn get(&self, field: Field) -> i32 {
        let dt = self.civil();
        match field {
            Field::Second => i32::from(dt.second()),
            Field::Minute => i32::from(dt.minute()),
            Field::Hour => i32::from(dt.hour()),
            Field::DayOfWeek => i32::from(dt.weekday().to_monday_one_offset()),
            Field::DayOfMonth => i32::from(dt.day()),
            Field::DayOfYear => i32::from(dt.day_of_year()),
            Field::Month => i32::from(dt.month()),
            Field::Year => i32::from(dt.year()),
        }
    }

    /// Return a copy with `field` set to `value`.
    ///
    /// [`Field::DayOfWeek`] takes 1 (Monday) to 7 (Sunday) and moves within the
    /// Monday-based week of the value.
    ///
    /// ## Errors
    /// - [`RecurError::TypeMismatch`] when setting a non-zero time field on a
    ///   DATE.
    /// - [`RecurError::InvalidFieldValue`] when the result does not exist,
    ///   e.g. day 31 of April.
    pub fn with(&self, field: Field, value: i32) -> Result<Self, RecurError> {
        let invalid = || RecurError::InvalidFieldValue {
            field: field.into(),
            value,
        };

        if field.is_time() && self.is_date() {
            return match value {
                0 => Ok(self.clone()),
                _ => Err(RecurError::TypeMismatch {
                    field,
                    kind: self.kind(),
                }),
            };
        }

        let small = || i8::try_from(value).map_err(|_| invalid());
        let dt = self.civil();
        let adjusted = match field {
            Field::Second => dt.with().second(small()?).build(),
            Field::Minute => dt.with().minute(small()?).build(),
            Field::Hour => dt.with().hour(small()?).build(),
            Field::DayOfWeek => {
                let target = Weekday::from_monday_one_offset(small()?).map_err(|_| invalid())?;
                let delta = target.to_monday_zero_offset() - dt.weekday().to_monday_zero_offset();
                dt.checked_add(i32::from(delta).days())
            }
            Field::DayOfMonth => dt.with().day(small()?).build(),
            Field::DayOfYear => {
                let day = i16::try_from(value).map_err(|_| invalid())?;
                dt.with().day_of_year(day).build()
            }
            Field::Month => dt.with().month(small()?).build(),
            Field::Year => {
                let year = i16::try_from(value).map_err(|_| invalid())?;
                dt.with().year(year).build()
            }
        }
        .map_err(|_| invalid())?;

        self.with_civil(adjusted)
    }

    /// Return a copy on `date`, keeping the time of day and the zone.
    ///
    /// ## Errors
    /// If the result cannot be placed in the value's zone.
    pub fn with_date(&self, date: Date) -> Result<Self, RecurError> {
        Ok(match self {
            Temporal::Date(_) => Temporal::Date(date),
            Temporal::Floating(dt) => Temporal::Floating(date.to_datetime(dt.time())),
            Temporal::Utc(dt) => Temporal::Utc(date.to_datetime(dt.time())),
            Temporal::Zoned(z) => {
                let dt = date.to_datetime(z.time());
                Temporal::Zoned(dt.to_zoned(z.time_zone().clone())?)
            }
        })
    }

    /// Return a copy at the civil date-time `dt`, keeping kind and zone.
    ///
    /// Nonexistent local times in a zoned value resolve the way RFC 5545
    /// asks for: a time in a gap moves forward by the gap length.
    ///
    /// ## Errors
    /// [`RecurError::TypeMismatch`] when `dt` carries a time of day and this is
    /// a DATE.
    pub fn with_civil(&self, dt: DateTime) -> Result<Self, RecurError> {
        match self {
            Temporal::Date(_) if dt.time() == Time::midnight() => Ok(Temporal::Date(dt.date())),
            Temporal::Date(_) => Err(RecurError::TypeMismatch {
                field: Field::Hour,
                kind: TemporalKind::Date,
            }),
            Temporal::Floating(_) => Ok(Temporal::Floating(dt)),
            Temporal::Utc(_) => Ok(Temporal::Utc(dt)),
            Temporal::Zoned(z) => Ok(Temporal::Zoned(dt.to_zoned(z.time_zone().clone())?)),
        }
    }

    /// Add a span. Calendar units keep the wall clock, time units are exact.
    /// DATE values drop any part of the span below one day.
    ///
    /// ## Errors
    /// If the result leaves the supported range.
    pub fn checked_add(&self, span: Span) -> Result<Self, RecurError> {
        Ok(match self {
            Temporal::Date(d) => Temporal::Date(d.checked_add(span)?),
            Temporal::Floating(dt) => Temporal::Floating(dt.checked_add(span)?),
            Temporal::Utc(dt) => Temporal::Utc(dt.checked_add(span)?),
            Temporal::Zoned(z) => Temporal::Zoned(z.checked_add(span)?),
        })
    }

    /// Convert to a UTC DATE-TIME. Floating values are taken as UTC, DATE
    /// values stay as they are.
    #[must_use]
    pub fn to_utc(&self) -> Self {
        match self {
            Temporal::Date(_) | Temporal::Utc(_) => self.clone(),
            Temporal::Floating(dt) => Temporal::Utc(*dt),
            Temporal::Zoned(z) => Temporal::Utc(TimeZone::UTC.to_datetime(z.timestamp())),
        }
    }

    /// Compare in the coarsest common terms: by date when either side is a
    /// DATE, by instant when both sides have one, by wall clock otherwise.
    ///
    /// This is the comparison used against UNTIL and query windows, where the
    /// two sides may be of different kinds.
    #[must_use]
    pub fn cmp_loose(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Temporal::Date(_), _) | (_, Temporal::Date(_)) => self.date().cmp(&other.date()),
            (Temporal::Utc(_) | Temporal::Zoned(_), Temporal::Utc(_) | Temporal::Zoned(_)) => {
                self.sort_key().cmp(&other.sort_key())
            }
            _ => self.civil().cmp(&other.civil()),
        }
    }

    /// UTC wall clock for values with an instant, local wall clock otherwise.
    fn sort_key(&self) -> DateTime {
        match self {
            Temporal::Zoned(z) => TimeZone::UTC.to_datetime(z.timestamp()),
            _ => self.civil(),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Temporal::Date(_) => 0,
            Temporal::Floating(_) => 1,
            Temporal::Utc(_) => 2,
            Temporal::Zoned(_) => 3,
        }
    }
}

impl Ord for Temporal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rank().cmp(&other.rank()))
            .then_with(|| self.tz_name().cmp(&other.tz_name()))
    }
}

impl PartialOrd for Temporal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Temporal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Temporal {}

impl From<Date> for Temporal {
    fn from(date: Date) -> Self {
        Temporal::Date(date)
    }
}

impl From<Zoned> for Temporal {
    fn from(zoned: Zoned) -> Self {
        Temporal::Zoned(zoned)
    }
}

impl Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write_date(f, *d),
            Temporal::Floating(dt) => write_date_time(f, *dt),
            Temporal::Utc(dt) => {
                write_date_time(f, *dt)?;
                write!(f, "Z")
            }
            Temporal::Zoned(z) => match z.time_zone().iana_name() {
                Some(name) => {
                    write!(f, "{KW_TZID}={name}:")?;
                    write_date_time(f, z.datetime())
                }
                None => write!(f, "{}", self.to_utc()),
            },
        }
    }
}

impl FromStr for Temporal {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_temporal(s)
    }
}

fn write_date(f: &mut fmt::Formatter<'_>, date: Date) -> fmt::Result {
    write!(f, "{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

fn write_date_time(f: &mut fmt::Formatter<'_>, dt: DateTime) -> fmt::Result {
    write_date(f, dt.date())?;
    write!(f, "T{:02}{:02}{:02}", dt.hour(), dt.minute(), dt.second())
}
