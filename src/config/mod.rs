#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{ContactError, Result};
use crate::utils::validation::{
    validate_email_address, validate_optional_url, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RECIPIENT: &str = "hello@example.com";

/// Settings for the forwarding endpoint (server side).
///
/// | Env Var                   | Default                  |
/// |---------------------------|--------------------------|
/// | `CONTACT_HOST`            | `0.0.0.0`                |
/// | `CONTACT_PORT`            | `3000`                   |
/// | `FORMSPREE_ENDPOINT`      | unset (relay answers 503)|
/// | `CONTACT_ALLOWED_ORIGINS` | `http://localhost:3000`  |
/// | `CONTACT_TIMEOUT_SECS`    | `10`                     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub downstream_endpoint: Option<String>,
    pub allowed_origins: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            downstream_endpoint: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Defaults, then the optional TOML file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            TomlConfig::from_file(path)?.apply_server(&mut config);
        }
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup("CONTACT_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("CONTACT_PORT") {
            self.port = parse_number("CONTACT_PORT", &port)?;
        }
        if let Some(endpoint) = lookup("FORMSPREE_ENDPOINT") {
            self.downstream_endpoint = Some(endpoint);
        }
        if let Some(origins) = lookup("CONTACT_ALLOWED_ORIGINS") {
            self.allowed_origins = split_list(&origins);
        }
        if let Some(timeout) = lookup("CONTACT_TIMEOUT_SECS") {
            self.timeout_secs = parse_number("CONTACT_TIMEOUT_SECS", &timeout)?;
        }
        Ok(())
    }

    /// The downstream URL, treating an empty value as not configured.
    pub fn downstream_endpoint(&self) -> Option<&str> {
        non_empty(self.downstream_endpoint.as_deref())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_optional_url("downstream_endpoint", self.downstream_endpoint())?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        for origin in self.allowed_origins.iter().filter(|o| o.as_str() != "*") {
            crate::utils::validation::validate_url("allowed_origins", origin)?;
        }
        if self.downstream_endpoint().is_none() {
            tracing::warn!("No downstream endpoint configured; /api/contact will answer 503");
        }
        Ok(())
    }
}

/// Settings for the submission client (browser side of the form).
///
/// `CONTACT_ENDPOINT` sets `forward_endpoint`; when it is absent the client
/// falls back to a `mailto:` link addressed to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub forward_endpoint: Option<String>,
    pub recipient: String,
    /// Address shown to the user when sending fails.
    pub direct_address: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            forward_endpoint: None,
            recipient: DEFAULT_RECIPIENT.to_string(),
            direct_address: DEFAULT_RECIPIENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            TomlConfig::from_file(path)?.apply_client(&mut config);
        }
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = lookup("CONTACT_ENDPOINT") {
            self.forward_endpoint = Some(endpoint);
        }
        if let Some(recipient) = lookup("CONTACT_RECIPIENT") {
            self.recipient = recipient;
        }
        if let Some(direct) = lookup("CONTACT_DIRECT_ADDRESS") {
            self.direct_address = direct;
        }
        if let Some(timeout) = lookup("CONTACT_TIMEOUT_SECS") {
            self.timeout_secs = parse_number("CONTACT_TIMEOUT_SECS", &timeout)?;
        }
        Ok(())
    }

    pub fn forward_endpoint(&self) -> Option<&str> {
        non_empty(self.forward_endpoint.as_deref())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_optional_url("forward_endpoint", self.forward_endpoint())?;
        validate_email_address("recipient", &self.recipient)?;
        validate_email_address("direct_address", &self.direct_address)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ContactError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
