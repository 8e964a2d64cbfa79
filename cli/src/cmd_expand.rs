// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use aimcal_recur::{
    Period, RecurBound, Strictness, Temporal, parse_period, parse_recur, parse_temporal,
};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::arg::{CommonArgs, OutputFormat};
use crate::config::Config;
use crate::report::or_report;

#[derive(Debug, Clone)]
pub struct CmdExpand {
    pub rrule: String,
    pub dtstart: String,
    pub tz: Option<String>,
    pub window: Option<String>,
    pub limit: Option<u32>,
    pub strictness: Option<Strictness>,
    pub output_format: OutputFormat,
}

impl CmdExpand {
    pub const NAME: &str = "expand";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("x")
            .about("Expand a recurrence rule into its occurrences")
            .arg(CommonArgs::rrule())
            .arg(
                arg!(-s --dtstart <DTSTART> "First instance, e.g. 20240101T090000")
                    .long_help(
                        "\
First instance and seed of the rule: a DATE (20240101), a floating DATE-TIME \
(20240101T090000), a UTC DATE-TIME (20240101T090000Z) or a zoned one \
(TZID=Europe/Berlin:20240101T090000)",
                    )
                    .required(true),
            )
            .arg(arg!(--tz <TZID> "Time zone of a floating DTSTART, e.g. America/New_York"))
            .arg(
                arg!(-w --window <PERIOD> "Only list occurrences in this period")
                    .long_help("Half-open period, start/end or start/duration, e.g. 20240101/P1M"),
            )
            .arg(
                arg!(-n --limit <N> "Stop after this many occurrences")
                    .value_parser(value_parser!(u32).range(1..)),
            )
            .arg(CommonArgs::strictness())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rrule: CommonArgs::get_rrule(matches),
            dtstart: matches
                .get_one::<String>("dtstart")
                .cloned()
                .unwrap_or_default(),
            tz: matches.get_one("tz").cloned(),
            window: matches.get_one("window").cloned(),
            limit: matches.get_one("limit").copied(),
            strictness: CommonArgs::get_strictness(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "expanding rule...");
        let output = self.expand(config)?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => {
                for occurrence in &output.occurrences {
                    println!("{occurrence}");
                }
                let summary = format!(
                    "{} occurrence(s), {}",
                    output.occurrences.len(),
                    output.termination
                );
                eprintln!("{}", summary.dimmed());
            }
        }
        Ok(())
    }

    /// Expand the rule as the flags and `config` ask.
    pub fn expand(&self, config: &Config) -> Result<ExpandOutput, Box<dyn Error>> {
        let mut rule = or_report(parse_recur(&self.rrule))?;
        let dtstart = or_report(parse_temporal(&self.dtstart))?;
        let dtstart = self.localize(dtstart, config)?;
        let window: Option<Period> = match &self.window {
            Some(window) => Some(or_report(parse_period(window))?),
            None => None,
        };

        let mut expand = config.expand;
        if let Some(strictness) = self.strictness {
            expand.strictness = strictness;
        }

        // the limit bounds a rule that nothing else bounds
        if rule.bound.is_none()
            && window.is_none()
            && let Some(limit) = self.limit
        {
            rule.bound = Some(RecurBound::Count(limit));
        }

        let expansion = rule.expand(&dtstart, window.as_ref(), &expand)?;
        let mut occurrences: Vec<String> = expansion
            .occurrences
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut termination = expansion.termination.to_string();
        if let Some(limit) = self.limit.and_then(|n| usize::try_from(n).ok())
            && occurrences.len() > limit
        {
            occurrences.truncate(limit);
            termination = "Limited".to_string();
        }

        Ok(ExpandOutput {
            rule: rule.to_string(),
            dtstart: dtstart.to_string(),
            window: window.map(|w| w.to_string()),
            occurrences,
            termination,
        })
    }

    /// Attach `--tz`, or the configured default zone, to a floating DTSTART.
    fn localize(&self, dtstart: Temporal, config: &Config) -> Result<Temporal, Box<dyn Error>> {
        match (&dtstart, &self.tz) {
            (Temporal::Floating(dt), Some(tz)) => Ok(Temporal::zoned(*dt, tz)?),
            (_, Some(_)) => Err(format!("--tz needs a floating DTSTART, got {dtstart}").into()),
            (Temporal::Floating(dt), None) => match &config.default_tz {
                Some(tz) => Ok(Temporal::zoned(*dt, tz)?),
                None => Ok(dtstart),
            },
            (_, None) => Ok(dtstart),
        }
    }
}

/// What `expand` prints, as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExpandOutput {
    /// The rule as it was understood
    pub rule: String,
    /// The seed, with the time zone applied
    pub dtstart: String,
    /// The query window, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
    /// Occurrences in iCalendar notation
    pub occurrences: Vec<String>,
    /// Why the expansion stopped, `Limited` when `--limit` cut it short
    pub termination: String,
}
