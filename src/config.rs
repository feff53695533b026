use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::LookupError;
use crate::lookup::RankingStrategy;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Spoonacular API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum number of candidate recipes per search
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Ranking policy requested from the API
    #[serde(default)]
    pub ranking: RankingStrategy,
    /// Whether pantry staples (salt, water, flour...) are ignored by the API
    #[serde(default = "default_ignore_pantry")]
    pub ignore_pantry: bool,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Transport retry behavior
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Retry policy of the lookup transport. The workflow itself never retries.
#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    /// Total attempts per lookup, 1 disables retrying
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    /// Initial delay between attempts in milliseconds (grows linearly)
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            max_results: default_max_results(),
            ranking: RankingStrategy::default(),
            ignore_pantry: default_ignore_pantry(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_max_results() -> u32 {
    15
}

fn default_ignore_pantry() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__RETRY__ATTEMPTS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse configuration from a TOML document, ignoring the environment
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// API key from the configuration, falling back to SPOONACULAR_API_KEY
    pub fn resolve_api_key(&self) -> Result<String, LookupError> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or(LookupError::MissingApiKey)
    }
}

/// Load configuration from `config.toml` and `RECIPE_FINDER__*` variables
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__RETRY__DELAY_MS
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
