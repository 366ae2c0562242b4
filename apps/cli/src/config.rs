//! # Configuration
//!
//! Where the extracts live and which report selections apply by default.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--purchases`, `--period`, ...)
//! 2. Environment variables (`STOCKLENS_*`)
//! 3. Config file (`config.toml`)
//! 4. Defaults: the exported file names in the working directory
//!
//! Each source is a [`ConfigLayer`]. Within a layer `data_dir` applies first,
//! so an explicit file path in the same layer wins over it.
//!
//! ## Example `config.toml`
//! ```toml
//! data_dir = "/srv/exports"
//! stock = "/srv/exports/stock-latest.csv"
//! period = "monthly"
//! strategy = "sale-day"
//! format = "json"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use stocklens_core::reports::ReportParams;
use stocklens_core::types::{DiscountStrategy, Period};
use stocklens_data::SourcePaths;

use crate::error::{CliError, CliResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Output Format
// =============================================================================

/// How command output is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text tables
    #[default]
    Text,

    /// One JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown format: '{}'. Valid options: text, json", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// Layers
// =============================================================================

/// One configuration source. Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub data_dir: Option<PathBuf>,
    pub purchases: Option<PathBuf>,
    pub sales: Option<PathBuf>,
    pub stock: Option<PathBuf>,
    pub period: Option<Period>,
    pub strategy: Option<DiscountStrategy>,
    pub format: Option<OutputFormat>,
}

impl ConfigLayer {
    /// Parses a config file's contents.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads `STOCKLENS_*` variables through `lookup`.
    ///
    /// ## Environment Variables
    /// - `STOCKLENS_DATA_DIR`: directory holding all three extracts
    /// - `STOCKLENS_PURCHASES` / `STOCKLENS_SALES` / `STOCKLENS_STOCK`: one extract
    /// - `STOCKLENS_PERIOD`: `weekly`, `monthly` or `quarterly`
    /// - `STOCKLENS_FORMAT`: `text` or `json`
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> CliResult<Self> {
        let path = |key: &str| lookup(key).map(PathBuf::from);

        let period = lookup("STOCKLENS_PERIOD")
            .map(|v| v.parse::<Period>())
            .transpose()
            .map_err(|e| CliError::config(format!("STOCKLENS_PERIOD: {}", e)))?;
        let format = lookup("STOCKLENS_FORMAT")
            .map(|v| v.parse::<OutputFormat>())
            .transpose()
            .map_err(|e| CliError::config(format!("STOCKLENS_FORMAT: {}", e)))?;

        Ok(ConfigLayer {
            data_dir: path("STOCKLENS_DATA_DIR"),
            purchases: path("STOCKLENS_PURCHASES"),
            sales: path("STOCKLENS_SALES"),
            stock: path("STOCKLENS_STOCK"),
            period,
            strategy: None,
            format,
        })
    }

    /// Reads the process environment.
    pub fn from_env() -> CliResult<Self> {
        ConfigLayer::from_env_with(|key| std::env::var(key).ok())
    }

    fn apply(self, config: &mut AppConfig) {
        if let Some(dir) = self.data_dir {
            config.sources = SourcePaths::in_dir(dir);
        }
        if let Some(path) = self.purchases {
            config.sources.purchases = path;
        }
        if let Some(path) = self.sales {
            config.sources.sales = path;
        }
        if let Some(path) = self.stock {
            config.sources.stock = path;
        }
        if let Some(period) = self.period {
            config.params.period = period;
        }
        if let Some(strategy) = self.strategy {
            config.params.strategy = strategy;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// Resolved application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppConfig {
    pub sources: SourcePaths,
    pub params: ReportParams,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Applies layers lowest priority first, then validates.
    pub fn from_layers(layers: impl IntoIterator<Item = ConfigLayer>) -> CliResult<Self> {
        let mut config = AppConfig::default();
        for layer in layers {
            layer.apply(&mut config);
        }
        config.validate()?;
        Ok(config)
    }

    /// Resolves file, environment and flag layers.
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn resolve(config_path: Option<&Path>, flags: ConfigLayer) -> CliResult<Self> {
        let file = match config_path {
            Some(path) => read_config_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => read_config_file(&path)?,
                _ => ConfigLayer::default(),
            },
        };

        AppConfig::from_layers([file, ConfigLayer::from_env()?, flags])
    }

    /// Rejects empty paths.
    pub fn validate(&self) -> CliResult<()> {
        let paths = [
            ("purchases", &self.sources.purchases),
            ("sales", &self.sources.sales),
            ("stock", &self.sources.stock),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(CliError::config(format!("{} path must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// Platform config location.
///
/// - **macOS**: `~/Library/Application Support/com.stocklens.stocklens/config.toml`
/// - **Windows**: `%APPDATA%\stocklens\stocklens\config\config.toml`
/// - **Linux**: `~/.config/stocklens/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "stocklens", "stocklens")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &Path) -> CliResult<ConfigLayer> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::config(format!("cannot read config {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), "Config file loaded");
    ConfigLayer::from_toml(&text)
}
