//! Board and authentication settings.
//!
//! Both structs deserialize from JSON with every field optional; missing
//! fields take their defaults.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_UNKNOWN_LABEL: &str = "Unknown";
const DEFAULT_UNKNOWN_MOM_LABEL: &str = "Unknown MoM";
const DEFAULT_SHARED_PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// First day of a calendar week for weekly windows.
    pub week_start: Weekday,
    /// Fallback shown for a dangling employee or manager reference.
    pub unknown_label: String,
    /// Fallback shown for a dangling meeting minutes reference.
    pub unknown_mom_label: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            unknown_mom_label: DEFAULT_UNKNOWN_MOM_LABEL.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Single password shared by every manager account.
    pub shared_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            shared_password: DEFAULT_SHARED_PASSWORD.to_string(),
        }
    }
}

impl AuthConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
