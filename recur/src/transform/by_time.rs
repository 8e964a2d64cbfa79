// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::Strictness;
use crate::error::RecurError;
use crate::temporal::Field;
use crate::transform::{Action, Candidate, Context, RulePart, Transformer};

/// BYHOUR, BYMINUTE and BYSECOND, which differ only in the field they touch.
#[derive(Debug)]
pub(crate) struct ByTime {
    field: Field,
    values: Vec<i32>,
    action: Action,
    strictness: Strictness,
}

impl ByTime {
    pub fn new(field: Field, values: &[u8], action: Action, ctx: Context) -> Self {
        Self {
            field,
            values: values.iter().map(|v| i32::from(*v)).collect(),
            action,
            strictness: ctx.strictness,
        }
    }
}

impl Transformer for ByTime {
    fn part(&self) -> RulePart {
        match self.field {
            Field::Hour => RulePart::ByHour,
            Field::Minute => RulePart::ByMinute,
            _ => RulePart::BySecond,
        }
    }

    fn apply(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, RecurError> {
        if self.action != Action::Expand {
            return Ok(candidates
                .into_iter()
                .filter(|c| self.values.contains(&c.value.get(self.field)))
                .collect());
        }

        let mut out = Vec::with_capacity(candidates.len() * self.values.len());
        for c in candidates {
            for &v in &self.values {
                match c.value.with(self.field, v) {
                    Ok(value) => out.push(Candidate::day(value)),
                    Err(err @ RecurError::TypeMismatch { .. }) => {
                        if self.strictness == Strictness::Strict {
                            return Err(err);
                        }
                        tracing::debug!(value = %c.value, %err, "dropping candidate");
                    }
                    Err(err @ RecurError::InvalidFieldValue { .. }) => {
                        tracing::debug!(value = %c.value, %err, "skipping value");
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(out)
    }
}
