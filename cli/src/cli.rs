// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::cmd_expand::CmdExpand;
use crate::cmd_validate::CmdValidate;
use crate::config::{Config, parse_config};

pub(crate) const APP_NAME: &str = "aim-recur";

type FilterHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Run the command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = init_tracing();
    let result = match Cli::parse() {
        Ok(cli) => cli.run(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the configured level, so the filter
/// is only handed out for reloading when it is unset.
fn init_tracing() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let overridable = from_env.is_none();
    let (filter, handle) = reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("warn")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    overridable.then_some(handle)
}

fn apply_log_level(handle: Option<&FilterHandle>, config: &Config) {
    let Some(handle) = handle else { return };
    match EnvFilter::try_new(&config.log.level) {
        Ok(filter) => {
            if let Err(e) = handle.modify(|current| *current = filter) {
                tracing::warn!(err = %e, "failed to update log filter from config");
            }
        }
        Err(e) => tracing::warn!(level = %config.log.level, err = %e, "invalid log level in config"),
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    #[must_use]
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Expand and validate iCalendar recurrence rules.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $AIM_RECUR_CONFIG, then \
$XDG_CONFIG_HOME/aim-recur/config.toml on Linux and MacOS, \
%APPDATA%/aim-recur/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .subcommand(CmdExpand::command())
            .subcommand(CmdValidate::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::{Expand, Validate};
        let command = match matches.subcommand() {
            Some((CmdExpand::NAME, matches)) => Expand(CmdExpand::from(matches)),
            Some((CmdValidate::NAME, matches)) => Validate(CmdValidate::from(matches)),
            _ => return Err("No command given, see --help".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    async fn run(self, filter: Option<&FilterHandle>) -> Result<(), Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(self.config).await?;
        apply_log_level(filter, &config);
        self.command.run(&config)
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Expand a rule into its occurrences
    Expand(CmdExpand),

    /// Check a rule against RFC 5545
    Validate(CmdValidate),
}

impl Commands {
    /// Run the command with the given configuration
    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        match self {
            Commands::Expand(a) => a.run(config),
            Commands::Validate(a) => a.run(config),
        }
    }
}
