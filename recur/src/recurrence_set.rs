// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use crate::config::ExpandConfig;
use crate::error::RecurError;
use crate::period::Period;
use crate::rrule::Recur;
use crate::temporal::Temporal;

/// The instances of a recurring component, RFC 5545 Section 3.8.5: DTSTART,
/// every RRULE and RDATE, minus every EXRULE and EXDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSet {
    /// First instance, and the seed of every rule
    pub dtstart: Temporal,
    /// Rules adding instances
    pub rrules: Vec<Recur>,
    /// Extra instances
    pub rdates: Vec<Temporal>,
    /// Rules removing instances
    pub exrules: Vec<Recur>,
    /// Removed instances. A DATE removes every instance on that day.
    pub exdates: Vec<Temporal>,
}

impl RecurrenceSet {
    /// A set holding only `dtstart`.
    #[must_use]
    pub const fn new(dtstart: Temporal) -> Self {
        Self {
            dtstart,
            rrules: Vec::new(),
            rdates: Vec::new(),
            exrules: Vec::new(),
            exdates: Vec::new(),
        }
    }

    /// Add a rule.
    #[must_use]
    pub fn rrule(mut self, rule: Recur) -> Self {
        self.rrules.push(rule);
        self
    }

    /// Add an instance.
    #[must_use]
    pub fn rdate(mut self, date: Temporal) -> Self {
        self.rdates.push(date);
        self
    }

    /// Add an exclusion rule.
    #[must_use]
    pub fn exrule(mut self, rule: Recur) -> Self {
        self.exrules.push(rule);
        self
    }

    /// Add an excluded instance.
    #[must_use]
    pub fn exdate(mut self, date: Temporal) -> Self {
        self.exdates.push(date);
        self
    }

    /// All instances, in order and without duplicates, restricted to
    /// `window` when one is given.
    ///
    /// ## Errors
    /// Whatever [`Recur::expand`] returns for any of the rules.
    #[tracing::instrument(level = "debug", skip_all, fields(dtstart = %self.dtstart))]
    pub fn expand(
        &self,
        window: Option<&Period>,
        config: &ExpandConfig,
    ) -> Result<Vec<Temporal>, RecurError> {
        let in_window = |t: &Temporal| window.is_none_or(|w| w.contains(t));

        let mut instances: Vec<Temporal> = std::iter::once(&self.dtstart)
            .chain(&self.rdates)
            .filter(|t| in_window(*t))
            .cloned()
            .collect();
        for rule in &self.rrules {
            instances.extend(rule.expand(&self.dtstart, window, config)?.occurrences);
        }

        let mut excluded: Vec<Temporal> = self.exdates.clone();
        for rule in &self.exrules {
            excluded.extend(rule.expand(&self.dtstart, window, config)?.occurrences);
        }

        instances.retain(|t| {
            let keep = !excluded.iter().any(|x| x.cmp_loose(t) == Ordering::Equal);
            if !keep {
                tracing::debug!(instance = %t, "excluded");
            }
            keep
        });
        instances.sort();
        instances.dedup();
        Ok(instances)
    }
}
