// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use aimcal_recur::Strictness;
use clap::{Arg, ArgMatches, arg, value_parser};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn rrule() -> Arg {
        arg!(--rrule <RRULE> "The recurrence rule, e.g. FREQ=WEEKLY;BYDAY=MO,FR;COUNT=4")
            .long_help(
                "\
The recurrence rule, with or without the RRULE: prefix. \
Parts may come in any order, e.g. FREQ=WEEKLY;BYDAY=MO,FR;COUNT=4",
            )
            .short('r')
            .required(true)
    }

    pub fn get_rrule(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("rrule")
            .cloned()
            .unwrap_or_default()
    }

    pub fn strictness() -> Arg {
        arg!(--strictness <MODE> "How to treat rules that break RFC 5545")
            .value_parser(value_parser!(Strictness))
    }

    pub fn get_strictness(matches: &ArgMatches) -> Option<Strictness> {
        matches.get_one("strictness").copied()
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("text")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Text)
    }
}
