use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::report::{RankMode, ReportOptions};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub sampling: SamplingConfig,
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub warmup_ms: u64,
    pub cpu_window_ms: u64,
    pub independent_passes: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            warmup_ms: 500,
            cpu_window_ms: 1000,
            independent_passes: false,
        }
    }
}

/// Row limits per section; an absent key shows every row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub processes_top: Option<usize>,
    pub details_top: Option<usize>,
    pub services_top: Option<usize>,
}

impl Config {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            warmup: Duration::from_millis(self.sampling.warmup_ms),
            cpu_window: Duration::from_millis(self.sampling.cpu_window_ms),
            processes: RankMode::from_limit(self.ranking.processes_top),
            details: RankMode::from_limit(self.ranking.details_top),
            services: RankMode::from_limit(self.ranking.services_top),
            independent_passes: self.sampling.independent_passes,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tasksnap").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
