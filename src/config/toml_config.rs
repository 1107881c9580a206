use crate::config::{ClientConfig, ServerConfig};
use crate::utils::error::{ContactError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional config file. Every key may be omitted; whatever is present
/// overrides the built-in defaults and is itself overridden by env vars.
///
/// ```toml
/// [server]
/// port = 8080
/// downstream_endpoint = "${FORMSPREE_ENDPOINT}"
/// allowed_origins = ["https://example.dev"]
///
/// [client]
/// forward_endpoint = "https://example.dev/api/contact"
/// recipient = "hello@example.dev"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub client: Option<ClientSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub downstream_endpoint: Option<String>,
    pub allowed_origins: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub forward_endpoint: Option<String>,
    pub recipient: Option<String>,
    pub direct_address: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContactError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content, |name| std::env::var(name).ok())?;

        toml::from_str(&processed_content).map_err(|e| ContactError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FORMSPREE_ENDPOINT})，未設定的變數換成空字串
    pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            ContactError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| {
                tracing::debug!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.into_owned())
    }

    pub fn apply_server(&self, config: &mut ServerConfig) {
        let Some(section) = &self.server else {
            return;
        };

        if let Some(host) = &section.host {
            config.host = host.clone();
        }
        if let Some(port) = section.port {
            config.port = port;
        }
        if let Some(endpoint) = &section.downstream_endpoint {
            config.downstream_endpoint = Some(endpoint.clone());
        }
        if let Some(origins) = &section.allowed_origins {
            config.allowed_origins = origins.clone();
        }
        if let Some(timeout) = section.timeout_secs {
            config.timeout_secs = timeout;
        }
    }

    pub fn apply_client(&self, config: &mut ClientConfig) {
        let Some(section) = &self.client else {
            return;
        };

        if let Some(endpoint) = &section.forward_endpoint {
            config.forward_endpoint = Some(endpoint.clone());
        }
        if let Some(recipient) = &section.recipient {
            config.recipient = recipient.clone();
        }
        if let Some(direct) = &section.direct_address {
            config.direct_address = direct.clone();
        }
        if let Some(timeout) = section.timeout_secs {
            config.timeout_secs = timeout;
        }
    }
}
