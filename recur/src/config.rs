// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// How hard the engine is on rules that break RFC 5545.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strictness {
    /// Any violation refuses the rule
    Strict,

    /// Skip what can be skipped, refuse what cannot
    #[default]
    Lenient,

    /// Like lenient, and also ignore inapplicable rule parts and a zero
    /// interval
    Relaxed,
}

/// Options of one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ExpandConfig {
    /// Violation handling.
    pub strictness: Strictness,

    /// Years without an occurrence after which expansion gives up, whatever
    /// the frequency.
    pub max_empty_years: u16,
}

impl ExpandConfig {
    /// Default span without an occurrence. A February 29th on a given
    /// weekday recurs within 40 years, also across a non-leap century year.
    pub const DEFAULT_MAX_EMPTY_YEARS: u16 = 40;

    /// Config with the given strictness and default limits.
    #[must_use]
    pub const fn with_strictness(strictness: Strictness) -> Self {
        Self {
            strictness,
            max_empty_years: Self::DEFAULT_MAX_EMPTY_YEARS,
        }
    }
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self::with_strictness(Strictness::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_config() {
        let config: ExpandConfig = toml::from_str(r#"strictness = "relaxed""#).unwrap();
        assert_eq!(config.strictness, Strictness::Relaxed);
        assert_eq!(
            config.max_empty_years,
            ExpandConfig::DEFAULT_MAX_EMPTY_YEARS
        );

        let config: ExpandConfig = toml::from_str("max_empty_years = 10").unwrap();
        assert_eq!(config.strictness, Strictness::Lenient);
        assert_eq!(config.max_empty_years, 10);
    }

    #[test]
    fn rejects_unknown_strictness() {
        assert!(toml::from_str::<ExpandConfig>(r#"strictness = "sloppy""#).is_err());
    }

    #[test]
    fn parses_strictness_names() {
        for (src, expected) in [
            ("strict", Strictness::Strict),
            ("lenient", Strictness::Lenient),
            ("relaxed", Strictness::Relaxed),
        ] {
            assert_eq!(src.parse::<Strictness>().unwrap(), expected);
            assert_eq!(expected.to_string(), src);
        }
    }
}
