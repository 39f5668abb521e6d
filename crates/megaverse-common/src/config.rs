//! ---
//! mv_section: "01-core-functionality"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Shared primitives and utilities for the Megaverse client."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds, DurationSeconds};
use tracing::debug;
use url::Url;

use crate::logging::LogFormat;

/// Public Megaverse challenge endpoint.
pub const DEFAULT_BASE_URL: &str = "https://challenge.crossmint.io/api";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_min_request_interval() -> Duration {
    Duration::from_millis(1000)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for the Megaverse client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and built-in defaults were used.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "MEGAVERSE_CONFIG";

    /// Load configuration from the first existing candidate, respecting the
    /// `MEGAVERSE_CONFIG` override. Falls back to defaults when nothing exists.
    ///
    /// The result is not validated: callers apply [`ConfigOverrides`] first and
    /// then call [`AppConfig::validate`].
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_path(path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!(
            inspected = %candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            "no configuration file found; using defaults"
        );
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    /// Load, apply overrides and validate in one step.
    pub fn resolve<P: AsRef<Path>>(
        candidates: &[P],
        overrides: &ConfigOverrides,
    ) -> Result<LoadedAppConfig> {
        let mut loaded = Self::load_with_source(candidates)?;
        overrides.apply(&mut loaded.config);
        loaded.config.validate().with_context(|| match &loaded.source {
            Some(path) => format!("invalid configuration in {}", path.display()),
            None => "invalid configuration".to_owned(),
        })?;
        Ok(loaded)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()
    }
}

/// Remote API connection settings.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub candidate_id: String,
    #[serde(
        rename = "min_request_interval_ms",
        default = "default_min_request_interval"
    )]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub min_request_interval: Duration,
    #[serde(rename = "request_timeout_secs", default = "default_request_timeout")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            candidate_id: String::new(),
            min_request_interval: default_min_request_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("api base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "api base_url '{}' must use http or https",
                self.base_url
            ));
        }
        if self.candidate_id.trim().is_empty() {
            return Err(anyhow!(
                "api candidate_id is required (set it in the config file, --candidate-id or MEGAVERSE_CANDIDATE_ID)"
            ));
        }
        if self.min_request_interval.is_zero() {
            return Err(anyhow!("api min_request_interval_ms must be positive"));
        }
        if self.request_timeout.is_zero() {
            return Err(anyhow!("api request_timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Directory for the rolling JSON log file; console only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}

/// Values supplied on the command line or through the environment that take
/// precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub candidate_id: Option<String>,
    pub min_request_interval: Option<Duration>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(candidate_id) = &self.candidate_id {
            config.api.candidate_id = candidate_id.clone();
        }
        if let Some(interval) = self.min_request_interval {
            config.api.min_request_interval = interval;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}
