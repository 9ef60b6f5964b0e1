//! Configuration loaded from the process environment
//!
//! Every loader takes a lookup function so tests can feed a fixture map
//! instead of touching process state. `from_env` wires the lookup to
//! `std::env::var`.

use std::fmt;
use std::time::Duration;

use autorenew_provider::log_sanitizer::mask_secret;
use autorenew_provider::{ClientOptions, DealCredentials, RegistrarCredentials};
use thiserror::Error;

pub const NC_APIKEY: &str = "NC_APIKEY";
pub const NC_USER: &str = "NC_USER";
pub const NC_IP: &str = "NC_IP";
pub const NC_API_URL: &str = "NC_API_URL";
pub const PIPELINE_DEALS_API_KEY: &str = "PIPELINE_DEALS_API_KEY";
pub const PIPELINE_DEALS_API_URL: &str = "PIPELINE_DEALS_API_URL";
pub const TOGGLE_COMMAND: &str = "AUTORENEW_TOGGLE_COMMAND";
pub const TOGGLE_TIMEOUT_SECS: &str = "AUTORENEW_TOGGLE_TIMEOUT_SECS";
pub const MAX_RETRIES: &str = "AUTORENEW_MAX_RETRIES";

const DEFAULT_TOGGLE_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Read a variable, treating blank values as unset.
fn optional(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    optional(lookup, var).ok_or(ConfigError::Missing(var))
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match optional(lookup, var) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Browser automation delegate settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglerConfig {
    /// Program and leading arguments; the domain is appended per call.
    /// `None` selects the log-only delegate.
    pub command: Option<Vec<String>>,
    /// Limit for a single domain.
    pub timeout: Duration,
}

impl TogglerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let command = optional(&lookup, TOGGLE_COMMAND)
            .map(|raw| raw.split_whitespace().map(str::to_string).collect());
        let timeout_secs = parsed(&lookup, TOGGLE_TIMEOUT_SECS, DEFAULT_TOGGLE_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: TOGGLE_TIMEOUT_SECS,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            command,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}

/// Everything a run needs: both API clients and the delegate.
#[derive(Clone)]
pub struct AppConfig {
    pub registrar: RegistrarCredentials,
    pub registrar_url: Option<String>,
    pub deals: DealCredentials,
    pub deals_url: Option<String>,
    pub max_retries: u32,
    pub toggler: TogglerConfig,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// Expects:
    /// - `NC_APIKEY`, `NC_USER`, `NC_IP`: registrar API key, user and whitelisted IP
    /// - `PIPELINE_DEALS_API_KEY`: CRM API key
    ///
    /// Optional: `NC_API_URL`, `PIPELINE_DEALS_API_URL`, `AUTORENEW_MAX_RETRIES`
    /// and the [`TogglerConfig`] variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let registrar = RegistrarCredentials {
            api_user: required(&lookup, NC_USER)?,
            api_key: required(&lookup, NC_APIKEY)?,
            client_ip: required(&lookup, NC_IP)?,
        };
        let deals = DealCredentials {
            api_key: required(&lookup, PIPELINE_DEALS_API_KEY)?,
        };

        Ok(Self {
            registrar,
            registrar_url: optional(&lookup, NC_API_URL),
            deals,
            deals_url: optional(&lookup, PIPELINE_DEALS_API_URL),
            max_retries: parsed(&lookup, MAX_RETRIES, 0)?,
            toggler: TogglerConfig::from_lookup(&lookup)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    #[must_use]
    pub fn registrar_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.registrar_url.clone(),
            max_retries: self.max_retries,
        }
    }

    #[must_use]
    pub fn deal_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.deals_url.clone(),
            max_retries: self.max_retries,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_user", &self.registrar.api_user)
            .field("api_key", &mask_secret(&self.registrar.api_key))
            .field("client_ip", &self.registrar.client_ip)
            .field("registrar_url", &self.registrar_url)
            .field("deals_api_key", &mask_secret(&self.deals.api_key))
            .field("deals_url", &self.deals_url)
            .field("max_retries", &self.max_retries)
            .field("toggler", &self.toggler)
            .finish()
    }
}
