// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;

use crate::error::RecurError;
use crate::transform::{Action, Candidate, RulePart, Scope, Transformer};

#[derive(Debug)]
pub(crate) struct ByMonth {
    months: Vec<i8>,
    action: Action,
}

impl ByMonth {
    pub fn new(months: &[u8], action: Action) -> Self {
        Self {
            months: months.iter().filter_map(|m| i8::try_from(*m).ok()).collect(),
            action,
        }
    }

    fn expand(&self, c: &Candidate) -> Result<Vec<Candidate>, RecurError> {
        let mut out = Vec::new();
        let last = c.last;
        for month in c
            .first
            .first_of_month()
            .series(1.month())
            .take_while(|m| *m <= last)
        {
            if !self.months.contains(&month.month()) {
                continue;
            }
            let first = month.max(c.first);
            let last = month.last_of_month().min(c.last);
            out.push(Candidate::range(&c.value, first, last, Scope::Month)?);
        }
        Ok(out)
    }
}

impl Transformer for ByMonth {
    fn part(&self) -> RulePart {
        RulePart::ByMonth
    }

    fn apply(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError> {
        let mut out = Vec::with_capacity(candidates.len());
        for c in candidates {
            match self.action {
                Action::Expand => out.extend(self.expand(&c)?),
                _ => out.extend(c.restrict(|d| self.months.contains(&d.month()))?),
            }
        }
        Ok(out)
    }
}
