use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// What to do with an unrecognized TYPE token while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypePolicy {
    /// Log a warning and use Grain
    #[default]
    Fallback,
    /// Fail with an invalid classification error
    Reject,
}

/// Parsing configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseConfig {
    /// Handling of unknown fermentable types
    #[serde(default)]
    pub type_policy: TypePolicy,
    /// Fail on records whose VERSION is not the supported schema version
    #[serde(default)]
    pub strict_version: bool,
    /// Display labels keyed by canonical type token (e.g. "Dry Extract")
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl ParseConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FERMENTABLE__ prefix
    /// 2. fermentable.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FERMENTABLE__TYPE_POLICY=reject
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn strict() -> Self {
        Self {
            type_policy: TypePolicy::Reject,
            strict_version: true,
            labels: HashMap::new(),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FERMENTABLE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from `fermentable.toml` (optional) and the environment.
pub fn load_config() -> Result<ParseConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("fermentable").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from an explicit file; the environment still overrides it.
pub fn load_config_from(path: &Path) -> Result<ParseConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}
