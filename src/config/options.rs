//! Client options: where the config file lives and how to reach the analyzer
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. Options file (`log-analyzer-client.toml`/`.yaml`/`.yml`, discovered
//!    in the base directory, or passed explicitly)
//! 3. Environment variables (`LOG_ANALYZER_*`)
//! 4. CLI overrides

use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domain::ActivePolicy;

pub const ENV_PREFIX: &str = "LOG_ANALYZER_";
pub const DEFAULT_CONFIG_PATH: &str = "log-analyzer.properties";
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080/api/keys/validate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to load client options")]
    Extract(#[source] Box<figment::Error>),

    #[error("Options file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Unsupported options file extension for {} (expected .toml, .yaml or .yml)", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("Invalid timeout_secs: {0}. Must be between 1 and 300")]
    InvalidTimeout(u64),

    #[error("service_url cannot be empty")]
    EmptyServiceUrl,

    #[error("config_path cannot be empty")]
    EmptyConfigPath,
}

impl From<figment::Error> for OptionsError {
    fn from(err: figment::Error) -> Self {
        OptionsError::Extract(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Path of the `.properties` or `.xml` log analyzer config.
    pub config_path: PathBuf,
    /// Validation endpoint used when the config file does not name one.
    pub service_url: String,
    pub timeout_secs: u64,
    pub active_policy: ActivePolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            active_policy: ActivePolicy::default(),
        }
    }
}

/// Values supplied on the command line. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub config_path: Option<PathBuf>,
    pub service_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub require_active: bool,
}

impl ClientOptions {
    /// Load options from `base_dir`, or from `options_file` when given.
    pub fn load(base_dir: &Path, options_file: Option<&Path>) -> Result<Self, OptionsError> {
        let mut figment = Figment::new().merge(Serialized::defaults(ClientOptions::default()));

        match options_file {
            Some(path) => {
                if !path.exists() {
                    return Err(OptionsError::MissingFile(path.to_path_buf()));
                }
                figment = merge_options_file(figment, path)?;
            }
            None => {
                if let Some(path) = discover_options_file(base_dir) {
                    tracing::debug!("Using options file {}", path.display());
                    figment = merge_options_file(figment, &path)?;
                }
            }
        }

        let options: ClientOptions = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        options.validate()?;
        Ok(options)
    }

    /// Apply CLI overrides and re-validate.
    pub fn with_overrides(mut self, overrides: OptionOverrides) -> Result<Self, OptionsError> {
        if let Some(path) = overrides.config_path {
            self.config_path = path;
        }
        if let Some(url) = overrides.service_url {
            self.service_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if overrides.require_active {
            self.active_policy = ActivePolicy::Require;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(OptionsError::InvalidTimeout(self.timeout_secs));
        }
        if self.service_url.trim().is_empty() {
            return Err(OptionsError::EmptyServiceUrl);
        }
        if self.config_path.as_os_str().is_empty() {
            return Err(OptionsError::EmptyConfigPath);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn merge_options_file(figment: Figment, path: &Path) -> Result<Figment, OptionsError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        _ => Err(OptionsError::UnsupportedFile(path.to_path_buf())),
    }
}

fn discover_options_file(base_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "log-analyzer-client.toml",
        ".log-analyzer-client.toml",
        "log-analyzer-client.yaml",
        "log-analyzer-client.yml",
    ];

    candidates.iter().map(|candidate| base_dir.join(candidate)).find(|path| path.exists())
}
