use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    pub scanner: ScannerConfig,
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_owned(),
            scanner: ScannerConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Lowest capability level that offers the unified cell list.
    pub unified_list_min_level: u32,

    /// Lowest capability level whose GSM cell location carries a PSC.
    pub location_psc_min_level: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            unified_list_min_level: 18,
            location_psc_min_level: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Emit the `#collectionDateTime` section at the top of reports.
    pub collection_time: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            collection_time: true,
        }
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}
