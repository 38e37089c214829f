use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use patton_core::{BannerType, OutputFormat, SourceType};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PattonConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

/// Where the Patton server lives and how failures are handled
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Host (and port) of the Patton server, with or without scheme
    #[serde(default = "default_host")]
    pub host: String,

    /// Keep going when a query in a batch fails, returning an empty result for it
    #[serde(default)]
    pub skip_on_fail: bool,

    /// Log outgoing requests at debug instead of info
    #[serde(default = "default_quiet_mode")]
    pub quiet_mode: bool,

    /// TCP connect timeout in seconds; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

/// Defaults applied to every query unless overridden per call
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct QueryConfig {
    #[serde(default)]
    pub source_type: SourceType,

    #[serde(default)]
    pub banner_type: BannerType,

    #[serde(default)]
    pub display_format: OutputFormat,
}

pub const DEFAULT_HOST: &str = "patton.owaspmadrid.org:8000";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_quiet_mode() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            skip_on_fail: false,
            quiet_mode: default_quiet_mode(),
            connect_timeout_secs: None,
        }
    }
}

/// Configuration snapshot for a single query.
///
/// Built fresh from `PattonConfig` for every call and never shared between
/// queries.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningConfig {
    pub patton_host: String,
    pub skip_on_fail: bool,
    pub quiet_mode: bool,
    pub source_type: SourceType,
    pub banner_type: BannerType,
    pub display_format: OutputFormat,
}

impl RunningConfig {
    /// Full URL for an API path such as `/api/v1/check-banners`.
    pub fn endpoint(&self, path: &str) -> String {
        let host = self.patton_host.trim_end_matches('/');
        if has_scheme(host) {
            format!("{}{}", host, path)
        } else {
            format!("http://{}{}", host, path)
        }
    }
}

fn has_scheme(host: &str) -> bool {
    let lower = host.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// A config file as written on disk: only the keys it sets are `Some`.
///
/// Layering files through this keeps an explicit `skip_on_fail = false` or
/// default host in a later file from being mistaken for "unset".
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub server: ServerOverlay,

    #[serde(default)]
    pub query: QueryOverlay,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ServerOverlay {
    pub host: Option<String>,
    pub skip_on_fail: Option<bool>,
    pub quiet_mode: Option<bool>,
    pub connect_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct QueryOverlay {
    pub source_type: Option<SourceType>,
    pub banner_type: Option<BannerType>,
    pub display_format: Option<OutputFormat>,
}

impl ConfigOverlay {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PattonConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    pub fn with_skip_on_fail(mut self, skip_on_fail: bool) -> Self {
        self.server.skip_on_fail = skip_on_fail;
        self
    }

    pub fn with_quiet_mode(mut self, quiet_mode: bool) -> Self {
        self.server.quiet_mode = quiet_mode;
        self
    }

    /// Snapshot for one query, with optional per-call overrides
    pub fn running_config(
        &self,
        source_type: Option<SourceType>,
        banner_type: Option<BannerType>,
    ) -> RunningConfig {
        RunningConfig {
            patton_host: self.server.host.clone(),
            skip_on_fail: self.server.skip_on_fail,
            quiet_mode: self.server.quiet_mode,
            source_type: source_type.unwrap_or(self.query.source_type),
            banner_type: banner_type.unwrap_or(self.query.banner_type),
            display_format: self.query.display_format,
        }
    }

    /// Apply every key the overlay sets, whatever its value
    pub fn merge(&mut self, overlay: &ConfigOverlay) {
        if let Some(host) = &overlay.server.host {
            self.server.host = host.clone();
        }
        if let Some(skip_on_fail) = overlay.server.skip_on_fail {
            self.server.skip_on_fail = skip_on_fail;
        }
        if let Some(quiet_mode) = overlay.server.quiet_mode {
            self.server.quiet_mode = quiet_mode;
        }
        if let Some(timeout) = overlay.server.connect_timeout_secs {
            self.server.connect_timeout_secs = Some(timeout);
        }

        if let Some(source_type) = overlay.query.source_type {
            self.query.source_type = source_type;
        }
        if let Some(banner_type) = overlay.query.banner_type {
            self.query.banner_type = banner_type;
        }
        if let Some(display_format) = overlay.query.display_format {
            self.query.display_format = display_format;
        }
    }

    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_else(|_| {
            format!(
                r#"# Patton client configuration

[server]
host = "{}"
skip_on_fail = false
quiet_mode = true
# connect_timeout_secs = 10

[query]
source_type = "auto"
banner_type = "auto"
display_format = "table"
"#,
                DEFAULT_HOST
            )
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PattonConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the user config file path (~/.config/patton/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/patton/config.toml"))
    }

    /// Get the current directory config file path (./patton.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./patton.toml")
    }

    /// Load and merge configs with priority:
    /// 1. User config (~/.config/patton/config.toml) - base
    /// 2. Current directory (./patton.toml) - wins
    pub fn load_with_merged_configs() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_path) = Self::get_user_config_path() {
            if user_path.exists() {
                match ConfigOverlay::load_from_file(&user_path) {
                    Ok(user_config) => {
                        config.merge(&user_config);
                        tracing::debug!("Loaded user config from: {}", user_path.display());
                    }
                    Err(e) => tracing::warn!("Ignoring {}: {}", user_path.display(), e),
                }
            }
        }

        let current_path = Self::get_current_config_path();
        if current_path.exists() {
            let current_config = ConfigOverlay::load_from_file(&current_path)?;
            config.merge(&current_config);
            tracing::debug!("Loaded current directory config from: {}", current_path.display());
        }

        Ok(config)
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        for (key, value) in env_vars {
            let Some(config_key) = key.strip_prefix("PATTON_") else {
                continue;
            };
            let invalid = || ConfigError::InvalidValue {
                key: key.clone(),
                value: value.clone(),
            };

            match config_key {
                "SERVER_HOST" => self.server.host = value.clone(),
                "SERVER_SKIP_ON_FAIL" => {
                    self.server.skip_on_fail = value.parse().map_err(|_| invalid())?;
                }
                "SERVER_QUIET_MODE" => {
                    self.server.quiet_mode = value.parse().map_err(|_| invalid())?;
                }
                "SERVER_CONNECT_TIMEOUT_SECS" => {
                    self.server.connect_timeout_secs = Some(value.parse().map_err(|_| invalid())?);
                }
                "QUERY_SOURCE_TYPE" => {
                    self.query.source_type = value.parse().map_err(|_| invalid())?;
                }
                "QUERY_BANNER_TYPE" => {
                    self.query.banner_type = value.parse().map_err(|_| invalid())?;
                }
                "QUERY_DISPLAY_FORMAT" => {
                    self.query.display_format = value.parse().map_err(|_| invalid())?;
                }
                _ => {} // Ignore unknown environment variables
            }
        }
        Ok(())
    }

    /// Merged config files followed by `PATTON_*` environment variables
    pub fn load_with_precedence(env_vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::load_with_merged_configs()?;
        config.apply_env_vars(env_vars)?;
        Ok(config)
    }
}
