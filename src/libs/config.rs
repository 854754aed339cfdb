//! Configuration for the oncall application.
//!
//! Configuration is a JSON file, `config.json`, in the platform data
//! directory (see [`DataStorage`]). The `ONCALL_CONFIG` environment variable
//! points to a different file. A missing file means an empty configuration;
//! commands that need shifts or a team then fail with a [`ConfigError`]
//! naming the file to edit.
//!
//! ## Example
//!
//! ```json
//! {
//!   "shifts": { "SRE": "PABC123", "OPS": "PDEF456" },
//!   "ops_shifts": { "OPS": "PDEF456", "BAU": "PGHI789" },
//!   "team": ["PUSER01", "PUSER02"],
//!   "business_day_calendar": "UK",
//!   "holiday_overrides": { "SG": ["2025-01-29", "2025-01-30"] }
//! }
//! ```
//!
//! The API token is not part of the file: it is read from the
//! `PAGERDUTY_API_TOKEN` environment variable, see [`token`].

use super::data_storage::DataStorage;
use super::error::ConfigError;
use super::holidays::{Holidays, Region};
use super::schedule::Shift;
use crate::api::pagerduty::DEFAULT_API_URL;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ONCALL_CONFIG";

/// Environment variable holding the PagerDuty API token.
pub const TOKEN_ENV: &str = "PAGERDUTY_API_TOKEN";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// API base URL, [`DEFAULT_API_URL`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Shift name to PagerDuty schedule id.
    #[serde(default)]
    pub shifts: BTreeMap<String, String>,

    /// Shifts of the ops roster. Falls back to `shifts` when empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ops_shifts: BTreeMap<String, String>,

    /// PagerDuty user ids counted by the sprint and ops-roster reports.
    #[serde(default)]
    pub team: Vec<String>,

    /// Holiday calendar excluded when counting business days.
    #[serde(default)]
    pub business_day_calendar: Region,

    /// Explicit holiday dates replacing a region's built-in rules.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub holiday_overrides: BTreeMap<Region, Vec<NaiveDate>>,

    /// Where the configuration was read from, for error messages.
    #[serde(skip)]
    location: PathBuf,
}

impl Config {
    /// Resolves the configuration path: `ONCALL_CONFIG` or the data directory.
    pub fn path() -> PathBuf {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => DataStorage::new().path(CONFIG_FILE_NAME),
        }
    }

    pub fn read() -> Result<Config, ConfigError> {
        Self::read_from(&Self::path())
    }

    /// Reads configuration from `path`; a missing file yields the default.
    pub fn read_from(path: &Path) -> Result<Config, ConfigError> {
        let mut config = match path.exists() {
            false => Config::default(),
            true => {
                let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str::<Config>(&config_str).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };
        config.location = path.to_path_buf();
        Ok(config)
    }

    pub fn location(&self) -> String {
        self.location.display().to_string()
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// All configured shifts, sorted by name.
    pub fn shifts(&self) -> Result<Vec<Shift>, ConfigError> {
        to_shifts(&self.shifts).ok_or_else(|| ConfigError::NoShifts(self.location()))
    }

    /// Shifts of the ops roster, sorted by name.
    pub fn ops_shifts(&self) -> Result<Vec<Shift>, ConfigError> {
        to_shifts(&self.ops_shifts).map_or_else(|| self.shifts(), Ok)
    }

    /// Looks up a single shift by name.
    pub fn shift(&self, name: &str) -> Result<Shift, ConfigError> {
        match self.shifts.get(name) {
            Some(id) => Ok(Shift::new(name, id)),
            None => Err(ConfigError::UnknownShift {
                name: name.to_string(),
                available: self.shifts.keys().cloned().collect::<Vec<_>>().join(" | "),
            }),
        }
    }

    /// The team allow-list; must not be empty.
    pub fn team(&self) -> Result<HashSet<String>, ConfigError> {
        let team: HashSet<String> = self.team.iter().filter(|id| !id.is_empty()).cloned().collect();
        if team.is_empty() {
            return Err(ConfigError::EmptyTeam(self.location()));
        }
        Ok(team)
    }

    pub fn holidays(&self) -> Holidays {
        Holidays::new(&self.holiday_overrides)
    }
}

fn to_shifts(shifts: &BTreeMap<String, String>) -> Option<Vec<Shift>> {
    match shifts.is_empty() {
        true => None,
        false => Some(shifts.iter().map(|(name, id)| Shift::new(name, id)).collect()),
    }
}

/// Reads the API token from `PAGERDUTY_API_TOKEN`.
pub fn token() -> Result<String, ConfigError> {
    resolve_token(env::var(TOKEN_ENV).ok())
}

/// Validates a token value; unset and blank are both missing.
pub fn resolve_token(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ConfigError::MissingToken(TOKEN_ENV)),
    }
}
