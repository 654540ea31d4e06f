use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use xdg::BaseDirectories;

use crate::attributes::AttributeSet;
use crate::widget::normalize::SharedConfig;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Document visibility; hidden widgets skip requests after initialization
    pub visible: bool,
    /// JSON file of custom translations handed to every widget
    pub shared_translations: Option<PathBuf>,
    /// Attributes shared by every widget
    pub shared: AttributeSet,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            visible: true,
            shared_translations: None,
            shared: AttributeSet::new(),
        }
    }
}

impl Config {
    /// Build the shared configuration, loading the translations file if one is set
    pub fn shared_config(&self) -> anyhow::Result<SharedConfig> {
        let shared = SharedConfig::new(self.shared.clone());
        match &self.shared_translations {
            Some(path) => Ok(shared.with_custom_translations(read_translations(path)?)),
            None => Ok(shared),
        }
    }
}

fn read_translations(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read translations {}", path.display()))?;
    let table: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid translations JSON in {}", path.display()))?;
    anyhow::ensure!(
        table.is_object(),
        "Translations in {} must be a JSON object",
        path.display()
    );
    Ok(table)
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    parse(&content)
}

/// Parse a config file; invalid content yields the defaults
pub fn parse(content: &str) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        warn!("CONFIG: Ignoring invalid config file: {}", e);
        Config::default()
    })
}
