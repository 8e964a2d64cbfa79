// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use aimcal_recur::ExpandConfig;
use tokio::fs;

use crate::cli::APP_NAME;

const CONFIG_ENV: &str = "AIM_RECUR_CONFIG";

/// Load the configuration from, in order of precedence, `path`, the
/// `AIM_RECUR_CONFIG` environment variable, or `aim-recur/config.toml` in the
/// user config directory. Without any of them the defaults apply.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let Some(dir) = get_config_dir() else {
            tracing::debug!("no user config directory, using defaults");
            return Ok(Config::default());
        };
        let config = dir.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration of the command-line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Expansion options, overridden by command-line flags
    pub expand: ExpandConfig,

    /// Logging options
    pub log: LogConfig,

    /// Time zone given to floating DTSTART values when `--tz` is absent
    pub default_tz: Option<String>,
}

/// The `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `info` or
    /// `aimcal_recur=debug`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir
}
