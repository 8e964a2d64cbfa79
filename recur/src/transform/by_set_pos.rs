// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::RecurError;
use crate::transform::{Candidate, RulePart, Transformer, resolve_index};

/// Picks positions out of the sorted, deduplicated occurrences of one period.
#[derive(Debug)]
pub(crate) struct BySetPos {
    positions: Vec<i32>,
}

impl BySetPos {
    pub fn new(positions: &[i16]) -> Self {
        Self {
            positions: positions.iter().map(|p| i32::from(*p)).collect(),
        }
    }
}

impl Transformer for BySetPos {
    fn part(&self) -> RulePart {
        RulePart::BySetPos
    }

    fn apply(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError> {
        let len = i32::try_from(candidates.len()).unwrap_or(i32::MAX);
        let mut out: Vec<Candidate> = self
            .positions
            .iter()
            .filter_map(|p| resolve_index(*p, len))
            .filter_map(|n| usize::try_from(n - 1).ok())
            .filter_map(|i| candidates.get(i).cloned())
            .collect();
        out.sort_by(|a, b| a.value.cmp(&b.value));
        out.dedup_by(|a, b| a.value == b.value);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{Date, date};

    use super::*;
    use crate::temporal::Temporal;

    fn days(ds: &[Date]) -> Vec<Candidate> {
        ds.iter().map(|d| Candidate::day(Temporal::Date(*d))).collect()
    }

    #[test]
    fn selects_from_both_ends() {
        let set = days(&[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        let out = BySetPos::new(&[-1, 1]).apply(set).unwrap();
        let picked: Vec<_> = out.iter().map(|c| c.value.date()).collect();
        assert_eq!(picked, vec![date(2024, 1, 1), date(2024, 1, 3)]);
    }

    #[test]
    fn ignores_positions_past_the_set() {
        let set = days(&[date(2024, 1, 1), date(2024, 1, 2)]);
        let out = BySetPos::new(&[3, -3]).apply(set).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn same_position_twice_yields_once() {
        let set = days(&[date(2024, 1, 1), date(2024, 1, 2)]);
        let out = BySetPos::new(&[2, -1]).apply(set).unwrap();
        assert_eq!(out.len(), 1);
    }
}
