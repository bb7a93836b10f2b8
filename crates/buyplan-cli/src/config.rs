//! Configuration for the buyplan CLI
//! The default file lives at ~/.buyplan/config.toml

use anyhow::{anyhow, Context, Result};
use buyplan_core::{
    PlanInputs, DEFAULT_CURVE_SAMPLES, DEFAULT_LIFESPAN_WEEKS, DEFAULT_STORE_COUNT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main buyplan configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BuyPlanConfig {
    /// Slider positions used when a flag is omitted
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Chart sampling and canvas sizes
    #[serde(default)]
    pub chart: ChartConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_lifespan")]
    pub lifespan: u32,
    #[serde(default = "default_stores")]
    pub stores: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            lifespan: default_lifespan(),
            stores: default_stores(),
        }
    }
}

fn default_lifespan() -> u32 {
    DEFAULT_LIFESPAN_WEEKS
}

fn default_stores() -> u32 {
    DEFAULT_STORE_COUNT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Points per interpolated reference curve
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_ascii_width")]
    pub ascii_width: usize,
    #[serde(default = "default_ascii_height")]
    pub ascii_height: usize,
    #[serde(default = "default_svg_width")]
    pub svg_width: u32,
    #[serde(default = "default_svg_height")]
    pub svg_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            ascii_width: default_ascii_width(),
            ascii_height: default_ascii_height(),
            svg_width: default_svg_width(),
            svg_height: default_svg_height(),
        }
    }
}

fn default_samples() -> usize {
    DEFAULT_CURVE_SAMPLES
}

fn default_ascii_width() -> usize {
    72
}

fn default_ascii_height() -> usize {
    18
}

fn default_svg_width() -> u32 {
    600
}

fn default_svg_height() -> u32 {
    400
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl BuyPlanConfig {
    /// Merge explicit flags over the configured defaults and validate.
    pub fn plan_inputs(&self, lifespan: Option<u32>, stores: Option<u32>) -> Result<PlanInputs> {
        let lifespan = lifespan.unwrap_or(self.defaults.lifespan);
        let stores = stores.unwrap_or(self.defaults.stores);
        PlanInputs::new(lifespan, stores).context("resolving lifespan and store count")
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow!("invalid log level `{}` in config", self.logging.level))
    }
}

/// Get the path to the default configuration file
/// Location: ~/.buyplan/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Cannot determine home directory"))
        .map(|h| h.join(".buyplan").join("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing default file yields the built-in defaults; a missing explicit
/// file is an error.
pub fn load_config(path: Option<&Path>) -> Result<BuyPlanConfig> {
    let (config_path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            return Err(anyhow!("config file {} not found", config_path.display()));
        }
        return Ok(BuyPlanConfig::default());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let config: BuyPlanConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(config)
}

/// Save the configuration, creating parent directories as needed.
pub fn save_config(config: &BuyPlanConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
