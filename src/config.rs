use crate::engine::{DEFAULT_REPEAT_COUNT, DEFAULT_TICK_PERIOD};
use crate::error::RepeatrError;
use crate::style::{FontStyle, TextColor};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub engine: EngineConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_period_ms: u64,
    pub default_repeat_count: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
            default_repeat_count: DEFAULT_REPEAT_COUNT.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_text_len: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { max_text_len: 200 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub style: FontStyle,
    pub color: TextColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub status_timeout_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            status_timeout_ms: 3000,
        }
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            engine: EngineConfig::default(),
            input: InputConfig::default(),
            display: DisplayConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Result of the fallback chain. Loading runs before logging exists, so
/// candidates that failed are kept in `skipped` for the caller to report.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    pub skipped: Vec<String>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok(LoadedConfig {
                config,
                source: ConfigSource::File(path.clone()),
                skipped: Vec::new(),
            });
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_first(&candidates))
    }

    /// Use the first candidate that exists and parses; fall back to defaults.
    pub fn load_first(candidates: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();

        for path in candidates.iter().filter(|path| path.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: ConfigSource::File(path.clone()),
                        skipped,
                    };
                }
                Err(e) => skipped.push(format!("Failed to load config from {}: {:#}", path.display(), e)),
            }
        }

        LoadedConfig {
            config: Self::default(),
            source: ConfigSource::Defaults,
            skipped,
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine or TUI cannot work with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.engine.tick_period_ms == 0 {
            return Err(RepeatrError::Config("engine.tick_period_ms must be positive".to_string()));
        }
        if self.input.max_text_len == 0 {
            return Err(RepeatrError::Config("input.max_text_len must be positive".to_string()));
        }
        if self.tui.tick_rate_ms == 0 {
            return Err(RepeatrError::Config("tui.tick_rate_ms must be positive".to_string()));
        }
        Ok(())
    }
}
