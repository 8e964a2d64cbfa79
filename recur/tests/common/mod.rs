// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the expansion tests.
//!
//! Rules, seeds and windows are written as iCalendar text, and occurrences
//! come back formatted the same way, so expectations read like RFC 5545.

use aimcal_recur::{ExpandConfig, Expansion, Period, Recur, Temporal};

/// Expand `rule` from `dtstart` with the default configuration.
pub fn expand(rule: &str, dtstart: &str) -> Expansion {
    expand_with(rule, dtstart, None, &ExpandConfig::default())
}

/// Expand `rule` from `dtstart` within `window`.
#[allow(dead_code)]
pub fn expand_in(rule: &str, dtstart: &str, window: &str) -> Expansion {
    let window: Period = window.parse().unwrap();
    expand_with(rule, dtstart, Some(&window), &ExpandConfig::default())
}

/// Expand with everything spelled out.
pub fn expand_with(
    rule: &str,
    dtstart: &str,
    window: Option<&Period>,
    config: &ExpandConfig,
) -> Expansion {
    let rule: Recur = rule
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse {rule}: {e}"));
    let dtstart: Temporal = dtstart.parse().unwrap();
    rule.expand(&dtstart, window, config)
        .unwrap_or_else(|e| panic!("Failed to expand {rule}: {e}"))
}

/// The occurrences as iCalendar text.
pub fn texts(expansion: &Expansion) -> Vec<String> {
    expansion
        .occurrences
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Occurrences of `rule` from a New York seed, as local date-times without
/// the TZID prefix.
#[allow(dead_code)]
pub fn new_york(rule: &str, dtstart: &str) -> Vec<String> {
    let expansion = expand(rule, &format!("TZID=America/New_York:{dtstart}"));
    texts(&expansion)
        .into_iter()
        .map(|s| s.trim_start_matches("TZID=America/New_York:").to_string())
        .collect()
}
