//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    /// Deployment identifier carried in logs
    #[serde(default = "default_site_id")]
    pub id: String,
}

fn default_site_id() -> String {
    "landmark-trigger".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    /// Path of the JSON settings file (preference flags + snapshot blob)
    #[serde(default = "default_settings_file")]
    pub file: String,
    /// Settings key holding the serialized activity history
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { file: default_settings_file(), snapshot_key: default_snapshot_key() }
    }
}

fn default_settings_file() -> String {
    "settings.json".to_string()
}

fn default_snapshot_key() -> String {
    "detected_activities".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Bounded delivery queue capacity (backpressure point)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { queue_capacity: default_queue_capacity() }
    }
}

fn default_queue_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize)]
pub struct LauncherConfig {
    /// Command template for launching an app; `{package}` is substituted
    #[serde(default = "default_app_command")]
    pub app_command: String,
    /// Command template for opening the fallback URL; `{url}` is substituted
    #[serde(default = "default_url_command")]
    pub url_command: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self { app_command: default_app_command(), url_command: default_url_command() }
    }
}

fn default_app_command() -> String {
    "gtk-launch {package}".to_string()
}

fn default_url_command() -> String {
    "xdg-open {url}".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval")]
    pub interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { interval_secs: default_metrics_interval() }
    }
}

fn default_metrics_interval() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_id: String,
    settings_file: String,
    snapshot_key: String,
    queue_capacity: usize,
    launcher_app_command: String,
    launcher_url_command: String,
    metrics_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            settings_file: default_settings_file(),
            snapshot_key: default_snapshot_key(),
            queue_capacity: default_queue_capacity(),
            launcher_app_command: default_app_command(),
            launcher_url_command: default_url_command(),
            metrics_interval_secs: default_metrics_interval(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from args or environment
    pub fn resolve_config_path(args: &[String]) -> String {
        for (i, arg) in args.iter().enumerate() {
            if arg == "--config" {
                if let Some(path) = args.get(i + 1) {
                    return path.clone();
                }
            }
            if let Some(path) = arg.strip_prefix("--config=") {
                return path.to_string();
            }
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            site_id: toml_config.site.id,
            settings_file: toml_config.settings.file,
            snapshot_key: toml_config.settings.snapshot_key,
            queue_capacity: toml_config.engine.queue_capacity,
            launcher_app_command: toml_config.launcher.app_command,
            launcher_url_command: toml_config.launcher.url_command,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn settings_file(&self) -> &str {
        &self.settings_file
    }

    pub fn snapshot_key(&self) -> &str {
        &self.snapshot_key
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn launcher_app_command(&self) -> &str {
        &self.launcher_app_command
    }

    pub fn launcher_url_command(&self) -> &str {
        &self.launcher_url_command
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.settings_file(), "settings.json");
        assert_eq!(config.snapshot_key(), "detected_activities");
        assert_eq!(config.queue_capacity(), 64);
        assert_eq!(config.metrics_interval_secs(), 60);
    }

    #[test]
    fn test_resolve_config_path_default() {
        let args: Vec<String> = vec!["landmark-trigger".to_string()];
        assert_eq!(Config::resolve_config_path(&args), "config/dev.toml");
    }

    #[test]
    fn test_resolve_config_path_from_arg() {
        let args: Vec<String> = vec![
            "landmark-trigger".to_string(),
            "--config".to_string(),
            "config/prod.toml".to_string(),
        ];
        assert_eq!(Config::resolve_config_path(&args), "config/prod.toml");
    }

    #[test]
    fn test_resolve_config_path_from_arg_equals() {
        let args: Vec<String> =
            vec!["landmark-trigger".to_string(), "--config=config/site.toml".to_string()];
        assert_eq!(Config::resolve_config_path(&args), "config/site.toml");
    }

    #[test]
    fn test_load_from_missing_path_falls_back() {
        let config = Config::load_from_path("/no/such/file.toml");
        assert_eq!(config.config_file(), "default");
        assert_eq!(config.snapshot_key(), "detected_activities");
    }
}
