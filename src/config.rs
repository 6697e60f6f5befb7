//! Application configuration loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Connection settings for the remote printing-services API.
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "ClientConfig::default_context_path")]
    pub context_path: String,
    #[serde(default = "ClientConfig::default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "ClientConfig::default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ClientConfig {
    fn default_context_path() -> String {
        "/api".to_string()
    }

    fn default_connect_timeout_ms() -> u64 {
        5000
    }

    fn default_read_timeout_ms() -> u64 {
        30000
    }

    /// Loads the layered configuration rooted at `dir`: `default.yaml`,
    /// then an optional `{app_env}.yaml` override, then `APP_*`
    /// environment variables.
    pub fn load(dir: &str, app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")))
            .add_source(File::with_name(&format!("{dir}/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            context_path: Self::default_context_path(),
            connect_timeout_ms: Self::default_connect_timeout_ms(),
            read_timeout_ms: Self::default_read_timeout_ms(),
            username: None,
            password: None,
        }
    }
}
