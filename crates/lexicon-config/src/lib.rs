use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::analyzer::AnalyzerConfig;
use self::ui::UiConfig;

pub mod analyzer;
pub mod ui;

/// Primary credential variable, `API_KEY` is accepted as a fallback
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const API_KEY_FALLBACK_VAR: &str = "API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing backend credential: set GEMINI_API_KEY (or API_KEY)")]
    MissingCredential,

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Build config from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(Config::default(), |var| env::var(var).ok())
    }

    /// Start from a JSON file, then apply environment overrides
    pub fn from_file_and_env(path: &Path) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let data = fs::read_to_string(path)?;
        let base: Config = serde_json::from_str(&data)?;
        tracing::info!("Loaded config file {}", path.display());

        Self::from_lookup(base, |var| env::var(var).ok())
    }

    /// Apply variables from `lookup` on top of `base`.
    ///
    /// Fails with [`ConfigError::MissingCredential`] when no API key is set,
    /// so startup can stop before any request is made.
    pub fn from_lookup<F>(mut base: Config, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .or_else(|| lookup(API_KEY_FALLBACK_VAR))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential)?;
        base.analyzer.api_key = api_key;

        if let Some(model) = lookup("LEXICON_MODEL") {
            base.analyzer.model = model;
        }
        if let Some(url) = lookup("LEXICON_API_URL") {
            base.analyzer.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(language) = lookup("LEXICON_EXPLANATION_LANGUAGE") {
            base.analyzer.explanation_language = language;
        }
        if let Some(count) = lookup("LEXICON_EXAMPLE_COUNT") {
            base.analyzer.example_count = parse_var("LEXICON_EXAMPLE_COUNT", count)?;
        }
        if let Some(secs) = lookup("LEXICON_REQUEST_TIMEOUT_SECS") {
            base.analyzer.request_timeout_secs = parse_var("LEXICON_REQUEST_TIMEOUT_SECS", secs)?;
        }
        if let Some(strict) = lookup("LEXICON_STRICT_EXAMPLES") {
            base.analyzer.strict_examples = parse_var("LEXICON_STRICT_EXAMPLES", strict)?;
        }
        if let Some(show) = lookup("LEXICON_SHOW_HINTS") {
            base.ui.show_hints = parse_var("LEXICON_SHOW_HINTS", show)?;
        }

        Ok(base)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    let parsed = value.trim().parse();
    parsed.map_err(|_| ConfigError::InvalidValue { var, value })
}
