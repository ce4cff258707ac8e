//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `STANDBY_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::lifecycle::{
    DEFAULT_EXTEND_THRESHOLD_SECS, DEFAULT_IDLE_WINDOW_SECS, LifecycleConfig,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `STANDBY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Key of the service record this server manages.
    pub model_id: String,

    /// Prefix for generated endpoint names.
    pub endpoint_prefix: String,

    /// App URL included in readiness SMS messages.
    pub app_url: String,

    /// Seconds of idle time before the endpoint is torn down.
    pub idle_window_secs: u64,

    /// Remaining-budget threshold (seconds) below which usage extends the timer.
    pub extend_threshold_secs: u64,

    /// Base URL of the model-serving control plane. Unset runs the
    /// provisioner in local mode (no endpoint is actually deployed).
    pub control_url: Option<String>,

    /// Model name handed to the control plane on deployment.
    pub model_name: String,

    /// Instance type handed to the control plane on deployment.
    pub instance_type: String,

    /// Textbelt API key. Unset logs notifications instead of sending SMS.
    pub textbelt_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_id: "sentiment-model".to_string(),
            endpoint_prefix: "sentiment-endpoint".to_string(),
            app_url: "http://localhost:8080".to_string(),
            idle_window_secs: DEFAULT_IDLE_WINDOW_SECS,
            extend_threshold_secs: DEFAULT_EXTEND_THRESHOLD_SECS,
            control_url: None,
            model_name: "sentiment-model".to_string(),
            instance_type: "ml.m5.large".to_string(),
            textbelt_key: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "STANDBY_PORT";
    const ENV_BIND_ADDR: &'static str = "STANDBY_BIND_ADDR";
    const ENV_MODEL_ID: &'static str = "STANDBY_MODEL_ID";
    const ENV_ENDPOINT_PREFIX: &'static str = "STANDBY_ENDPOINT_PREFIX";
    const ENV_APP_URL: &'static str = "STANDBY_APP_URL";
    const ENV_IDLE_WINDOW_SECS: &'static str = "STANDBY_IDLE_WINDOW_SECS";
    const ENV_EXTEND_THRESHOLD_SECS: &'static str = "STANDBY_EXTEND_THRESHOLD_SECS";
    const ENV_CONTROL_URL: &'static str = "STANDBY_CONTROL_URL";
    const ENV_MODEL_NAME: &'static str = "STANDBY_MODEL_NAME";
    const ENV_INSTANCE_TYPE: &'static str = "STANDBY_INSTANCE_TYPE";
    const ENV_TEXTBELT_KEY: &'static str = "STANDBY_TEXTBELT_KEY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port: u16 = Self::parse_u64(Self::ENV_PORT, defaults.port as u64)?
            .try_into()
            .map_err(|_| ConfigError::InvalidValue {
                var: Self::ENV_PORT,
                message: "port out of range".to_string(),
            })?;
        let bind_addr = match env::var(Self::ENV_BIND_ADDR) {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                var: Self::ENV_BIND_ADDR,
                message: format!("not an IP address: {s}"),
            })?,
            Err(_) => defaults.bind_addr,
        };

        Ok(Self {
            port,
            bind_addr,
            model_id: Self::parse_string(Self::ENV_MODEL_ID, defaults.model_id),
            endpoint_prefix: Self::parse_string(Self::ENV_ENDPOINT_PREFIX, defaults.endpoint_prefix),
            app_url: Self::parse_string(Self::ENV_APP_URL, defaults.app_url),
            idle_window_secs: Self::parse_u64(
                Self::ENV_IDLE_WINDOW_SECS,
                defaults.idle_window_secs,
            )?,
            extend_threshold_secs: Self::parse_u64(
                Self::ENV_EXTEND_THRESHOLD_SECS,
                defaults.extend_threshold_secs,
            )?,
            control_url: env::var(Self::ENV_CONTROL_URL).ok().filter(|s| !s.is_empty()),
            model_name: Self::parse_string(Self::ENV_MODEL_NAME, defaults.model_name),
            instance_type: Self::parse_string(Self::ENV_INSTANCE_TYPE, defaults.instance_type),
            textbelt_key: env::var(Self::ENV_TEXTBELT_KEY).ok().filter(|s| !s.is_empty()),
        })
    }

    fn parse_string(var: &'static str, default: String) -> String {
        env::var(var).ok().filter(|s| !s.is_empty()).unwrap_or(default)
    }

    fn parse_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var) {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                var,
                message: format!("not a number: {s}"),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Checks cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_window_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: Self::ENV_IDLE_WINDOW_SECS,
                message: "idle window must be positive".to_string(),
            });
        }
        if self.extend_threshold_secs >= self.idle_window_secs {
            return Err(ConfigError::InvalidValue {
                var: Self::ENV_EXTEND_THRESHOLD_SECS,
                message: "extend threshold must be shorter than the idle window".to_string(),
            });
        }
        Ok(())
    }

    /// `host:port` string for the HTTP listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// The lifecycle tunables carried by this server config.
    pub fn lifecycle_config(&self) -> LifecycleConfig {
        LifecycleConfig {
            model_id: self.model_id.clone(),
            endpoint_prefix: self.endpoint_prefix.clone(),
            idle_window: Duration::from_secs(self.idle_window_secs),
            extend_threshold: Duration::from_secs(self.extend_threshold_secs),
            app_url: self.app_url.clone(),
        }
    }
}
