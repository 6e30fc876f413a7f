use crate::core::db::environment::FailurePolicy;
use crate::core::{OdbcError, Result};
use crate::locale::LocaleConv;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    pub locale: Option<LocaleConfig>,
}

/// Driver-manager environment settings.
#[derive(Debug, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    /// Share one connection pool per environment. Only read before the
    /// first connection.
    #[serde(default = "default_pooling")]
    pub pooling: bool,
    /// Abort the process when the environment cannot be allocated.
    #[serde(default)]
    pub fatal_errors: bool,
}

fn default_pooling() -> bool {
    true
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        EnvironmentConfig {
            pooling: default_pooling(),
            fatal_errors: false,
        }
    }
}

impl EnvironmentConfig {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fatal_errors {
            FailurePolicy::Abort
        } else {
            FailurePolicy::ReturnError
        }
    }
}

/// Result presentation settings consumed by the row layer.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ResultsConfig {
    #[serde(default)]
    pub lowercase: bool,
}

/// Locale overrides, used instead of querying the host.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub decimal_point: Option<String>,
    pub thousands_sep: Option<String>,
    pub currency_symbol: Option<String>,
}

impl From<&LocaleConfig> for LocaleConv {
    fn from(cfg: &LocaleConfig) -> Self {
        LocaleConv {
            decimal_point: cfg.decimal_point.clone(),
            thousands_sep: cfg.thousands_sep.clone(),
            currency_symbol: cfg.currency_symbol.clone(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| OdbcError::Config(e.to_string()))
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// let config = odbckit::config::load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

/// `<config dir>/odbckit/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("odbckit").join("config.toml"))
}

/// Loads the user configuration, or defaults when there is none.
pub fn load_default_config() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Loading configuration from {:?}", path);
            load_config(path)
        }
        _ => Ok(Config::default()),
    }
}
