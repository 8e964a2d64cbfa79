// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Periods of time, RFC 5545 Section 3.3.9, used as query windows.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::Span;

use crate::error::RecurError;
use crate::temporal::Temporal;

/// The position of a value relative to a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// The value is before the start of the period.
    Before,

    /// The value is within the period.
    InRange,

    /// The value is at or after the end of the period.
    After,

    /// The period is invalid, e.g., its start is after its end.
    InvalidRange,
}

/// A half-open span of time `[start, end)`.
///
/// Comparisons between a period and values of another kind use
/// [`Temporal::cmp_loose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    start: Temporal,
    end: Temporal,
}

impl Period {
    /// Create a period from explicit bounds.
    ///
    /// ## Errors
    /// If `end` precedes `start`.
    pub fn new(start: Temporal, end: Temporal) -> Result<Self, RecurError> {
        match start.cmp_loose(&end) {
            Ordering::Greater => Err(RecurError::InvalidPeriod { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    /// Create a period from a start and a duration.
    ///
    /// ## Errors
    /// If the end cannot be computed or the duration is negative.
    pub fn with_duration(start: Temporal, duration: Span) -> Result<Self, RecurError> {
        let end = start.checked_add(duration)?;
        Self::new(start, end)
    }

    /// Start of the period, inclusive.
    #[must_use]
    pub const fn start(&self) -> &Temporal {
        &self.start
    }

    /// End of the period, exclusive.
    #[must_use]
    pub const fn end(&self) -> &Temporal {
        &self.end
    }

    /// Where `t` lies relative to this period.
    #[must_use]
    pub fn position(&self, t: &Temporal) -> RangePosition {
        if self.start.cmp_loose(&self.end) == Ordering::Greater {
            RangePosition::InvalidRange
        } else if t.cmp_loose(&self.start) == Ordering::Less {
            RangePosition::Before
        } else if t.cmp_loose(&self.end) == Ordering::Less {
            RangePosition::InRange
        } else {
            RangePosition::After
        }
    }

    /// Whether `t` lies within the period.
    #[must_use]
    pub fn contains(&self, t: &Temporal) -> bool {
        self.position(t) == RangePosition::InRange
    }

    /// Whether `other` lies entirely within this period.
    #[must_use]
    pub fn contains_period(&self, other: &Period) -> bool {
        other.start.cmp_loose(&self.start) != Ordering::Less
            && other.end.cmp_loose(&self.end) != Ordering::Greater
    }

    /// Whether the two periods share any instant.
    #[must_use]
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start.cmp_loose(&other.end) == Ordering::Less
            && other.start.cmp_loose(&self.end) == Ordering::Less
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

impl FromStr for Period {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_period(s)
    }
}
