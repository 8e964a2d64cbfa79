// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use aimcal_recur::{
    Severity, Strictness, Violation, parse_recur, parse_temporal, validate, validate_with_seed,
};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::arg::CommonArgs;
use crate::config::Config;
use crate::report::or_report;

#[derive(Debug, Clone)]
pub struct CmdValidate {
    pub rrule: String,
    pub dtstart: Option<String>,
    pub strictness: Option<Strictness>,
}

impl CmdValidate {
    pub const NAME: &str = "validate";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("check")
            .about("Check a recurrence rule against RFC 5545")
            .arg(CommonArgs::rrule())
            .arg(arg!(-s --dtstart <DTSTART> "Also check UNTIL against this DTSTART"))
            .arg(CommonArgs::strictness())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rrule: CommonArgs::get_rrule(matches),
            dtstart: matches.get_one("dtstart").cloned(),
            strictness: CommonArgs::get_strictness(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "validating rule...");
        let strictness = self.strictness.unwrap_or(config.expand.strictness);
        let graded = self.check(strictness)?;
        for (violation, severity) in &graded {
            let label = match severity {
                Severity::Error => "error:".red().bold(),
                Severity::Warning => "warning:".yellow().bold(),
            };
            println!("{label} {violation}");
        }

        let errors = graded
            .iter()
            .filter(|(_, s)| *s == Severity::Error)
            .count();
        match errors {
            0 => {
                println!("{} under {} strictness", "valid".green(), strictness);
                Ok(())
            }
            n => Err(format!("{n} violation(s) refuse the rule under {strictness} strictness").into()),
        }
    }

    /// Every violation of the rule, graded under `strictness`.
    pub fn check(
        &self,
        strictness: Strictness,
    ) -> Result<Vec<(Violation, Severity)>, Box<dyn Error>> {
        let rule = or_report(parse_recur(&self.rrule))?;
        let violations = match &self.dtstart {
            Some(dtstart) => validate_with_seed(&rule, &or_report(parse_temporal(dtstart))?),
            None => validate(&rule),
        };
        Ok(violations
            .into_iter()
            .map(|v| (v, v.severity(strictness)))
            .collect())
    }
}
