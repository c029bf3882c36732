// src/config.rs

use std::{env, time::Duration};
use url::Url;

pub const DEFAULT_RANGE: &str = "Sheet1!A:Z";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("invalid api base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Where the proxy reads from and how it listens. Fixed for the lifetime of
/// the process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub spreadsheet_id: String,
    /// A1 notation, e.g. `Sheet1!A:Z`.
    pub range: String,
    pub port: u16,
    pub api_base: Url,
    /// Applied to the outbound Sheets request when set.
    pub timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            port: DEFAULT_PORT,
            api_base: Url::parse(DEFAULT_API_BASE).expect("default api base should parse"),
            timeout: None,
        }
    }

    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any key lookup, so tests don't need to
    /// touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let spreadsheet_id = lookup("SPREADSHEET_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SPREADSHEET_ID"))?;

        let range = lookup("SHEET_RANGE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RANGE.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let api_base = Url::parse(
            lookup("SHEETS_API_BASE")
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE),
        )?;
        // Request paths are appended to the base, so it needs a hierarchical path.
        if api_base.cannot_be_a_base() {
            return Err(ConfigError::Invalid {
                name: "SHEETS_API_BASE",
                value: api_base.to_string(),
            });
        }

        let timeout = match lookup("SHEETS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "SHEETS_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            spreadsheet_id,
            range,
            port,
            api_base,
            timeout,
        })
    }
}
