use serde::{Deserialize, Serialize};
use std::fs;

use crate::session::{MAX_DECKS, MIN_DECKS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Pool seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Lane count a caller uses when the player does not pick one
    pub default_num_decks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub default_num_decks: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            default_num_decks: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: EngineConfig,
    pub sources: ConfigSources,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_num_decks: MIN_DECKS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub const CONFIG_PATH_VAR: &str = "HILO_CONFIG";
pub const SEED_VAR: &str = "HILO_SEED";
pub const DECKS_VAR: &str = "HILO_DECKS";

pub fn load() -> Result<EngineConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `HILO_CONFIG`, then `HILO_*` env overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = EngineConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.default_num_decks {
            cfg.default_num_decks = v;
            sources.default_num_decks = ValueSource::File;
        }
    }

    if let Some(seed) = non_empty_var(SEED_VAR) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("seed {seed:?} is not a u64")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(decks) = non_empty_var(DECKS_VAR) {
        cfg.default_num_decks = decks
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("deck count {decks:?} is not a number")))?;
        sources.default_num_decks = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    default_num_decks: Option<u32>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn validate(cfg: &EngineConfig) -> Result<(), ConfigError> {
    if !(MIN_DECKS..=MAX_DECKS).contains(&cfg.default_num_decks) {
        return Err(ConfigError::Invalid(format!(
            "default_num_decks must be between {MIN_DECKS} and {MAX_DECKS}, got {}",
            cfg.default_num_decks
        )));
    }
    Ok(())
}
