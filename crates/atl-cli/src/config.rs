//! Configuration loading and management.

use std::path::{Path, PathBuf};

use atl_core::ExtractConfig;
use atl_core::extract::DEFAULT_DATE_FORMAT;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::commands::chart::ChartOptions;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// chrono format of date marker lines in the activity log.
    pub date_format: String,
    /// Total chart width in pixels, margins included.
    pub chart_width: u32,
    /// Total chart height in pixels, margins included.
    pub chart_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            chart_width: 960,
            chart_height: 500,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATL_*)
        figment = figment.merge(Env::prefixed("ATL_"));

        figment.extract()
    }

    /// Extraction settings derived from this configuration.
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            date_format: self.date_format.clone(),
        }
    }

    /// Chart dimensions derived from this configuration.
    pub const fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.chart_width,
            height: self.chart_height,
        }
    }
}

/// Returns the platform-specific config directory for atl.
///
/// On Linux: `~/.config/atl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("atl"))
}
