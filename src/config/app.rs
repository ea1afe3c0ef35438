//! Top-level configuration file
//!
//! Read-only TOML loaded at startup. Every key is optional; missing keys fall
//! back to the defaults below, and environment variables can override the
//! global values afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use super::monitor::{EffectiveSettings, MultiMonitorConfiguration, check_range};
use crate::constants::{defaults, validation};
use crate::proximity::ProximityConfiguration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Global threshold in logical pixels
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: i32,

    /// Global push distance in logical pixels
    #[serde(default = "default_push_distance")]
    pub push_distance: i32,

    #[serde(default)]
    pub proximity: ProximityConfiguration,

    #[serde(default)]
    pub multi_monitor: MultiMonitorConfiguration,
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

fn default_proximity_threshold() -> i32 {
    defaults::PROXIMITY_THRESHOLD
}

fn default_push_distance() -> i32 {
    defaults::PUSH_DISTANCE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            proximity_threshold: default_proximity_threshold(),
            push_distance: default_push_distance(),
            proximity: ProximityConfiguration::default(),
            multi_monitor: MultiMonitorConfiguration::default(),
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default path, or defaults if no file exists yet
    pub fn load() -> Result<Self> {
        let config_path = Self::path();
        if !config_path.exists() {
            info!(path = %config_path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse TOML from {:?}", path))?;
        info!(
            path = %path.display(),
            monitors = config.multi_monitor.per_monitor_settings.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid config TOML")
    }

    /// Override globals from the environment, ignoring unparsable values
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|var| env::var(var).ok());
    }

    /// Same as [`AppConfig::apply_env_overrides`] with a custom variable source
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        use crate::constants::env as vars;

        if let Some(threshold) = parse_override::<i32>(vars::THRESHOLD, lookup(vars::THRESHOLD)) {
            info!(threshold, "proximity threshold overridden from environment");
            self.proximity_threshold = threshold;
        }
        if let Some(distance) = parse_override::<i32>(vars::PUSH_DISTANCE, lookup(vars::PUSH_DISTANCE)) {
            info!(distance, "push distance overridden from environment");
            self.push_distance = distance;
        }
        if let Some(level) = lookup(vars::LOG_LEVEL) {
            self.log_level = level.to_lowercase();
        }
    }

    /// Every problem in the file, globals first
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(check_range(
            "Proximity threshold",
            self.proximity_threshold,
            validation::MAX_PROXIMITY_THRESHOLD,
        ));
        errors.extend(check_range("Push distance", self.push_distance, validation::MAX_PUSH_DISTANCE));
        if let Err(e) = self.proximity.validate() {
            errors.push(e.to_string());
        }
        errors.extend(self.multi_monitor.validate());
        errors
    }

    /// Settings for `monitor_id` after per-monitor overrides
    pub fn effective_settings(&self, monitor_id: &str) -> Option<EffectiveSettings> {
        self.multi_monitor
            .effective_settings(monitor_id, self.proximity_threshold, self.push_distance)
    }
}

fn parse_override<T: FromStr>(var: &str, raw: Option<String>) -> Option<T>
where
    <T as FromStr>::Err: std::fmt::Display,
{
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(var = var, value = %raw, error = %e, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PerMonitorSettings;
    use crate::proximity::ProximityAlgorithm;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.proximity_threshold, 50);
        assert_eq!(config.push_distance, 100);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_full_toml() {
        let contents = r#"
log_level = "debug"
proximity_threshold = 80
push_distance = 150

[proximity]
algorithm = "manhattan_distance"
horizontal_sensitivity_multiplier = 1.5

[multi_monitor]
respect_taskbar_areas = false

[multi_monitor.per_monitor_settings."HDMI-1"]
custom_push_distance = 300
"#;
        let config = AppConfig::from_toml_str(contents).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.proximity.algorithm, ProximityAlgorithm::ManhattanDistance);
        assert_eq!(config.proximity.horizontal_sensitivity_multiplier, 1.5);
        assert_eq!(config.proximity.vertical_sensitivity_multiplier, 1.0);
        assert!(!config.multi_monitor.respect_taskbar_areas);
        assert!(config.multi_monitor.enable_wrapping);

        let hdmi = config.effective_settings("HDMI-1").unwrap();
        assert_eq!(hdmi.proximity_threshold, 80);
        assert_eq!(hdmi.push_distance, 300);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("proximity_threshold = \"far\"").is_err());
        assert!(AppConfig::from_toml_str("[proximity\nalgorithm = 1").is_err());
    }

    #[test]
    fn test_validate_collects_all_layers() {
        let mut config = AppConfig {
            proximity_threshold: 0,
            push_distance: 1500,
            ..AppConfig::default()
        };
        config.proximity.vertical_sensitivity_multiplier = -2.0;
        config.multi_monitor.per_monitor_settings.insert(
            String::new(),
            PerMonitorSettings {
                custom_proximity_threshold: Some(900),
                ..PerMonitorSettings::default()
            },
        );

        let errors = config.validate();
        assert_eq!(errors.len(), 5);
        assert!(errors[0].starts_with("Proximity threshold must be greater than 0"));
        assert!(errors[1].starts_with("Push distance should not exceed 1000 pixels"));
        assert!(errors[2].contains("Invalid proximity configuration"));
        assert!(errors.iter().any(|e| e.contains("empty monitor identifier")));
        assert!(errors.iter().any(|e| e.contains("should not exceed 500 pixels")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "proximity_threshold = 42").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.proximity_threshold, 42);
        assert_eq!(config.push_distance, 100);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |var| vars.get(var).map(|v| v.to_string())
    }

    #[test]
    fn test_env_override_applies() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(lookup(&[
            ("CURSOR_AVOID_THRESHOLD", "120"),
            ("CURSOR_AVOID_PUSH_DISTANCE", " 300 "),
            ("LOG_LEVEL", "DEBUG"),
        ]));
        assert_eq!(config.proximity_threshold, 120);
        assert_eq!(config.push_distance, 300);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_override_unparsable_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(lookup(&[
            ("CURSOR_AVOID_THRESHOLD", "close"),
            ("CURSOR_AVOID_PUSH_DISTANCE", "12.5"),
        ]));
        assert_eq!(config.proximity_threshold, 50);
        assert_eq!(config.push_distance, 100);
        // Unset LOG_LEVEL leaves the configured level alone
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_path_ends_with_app_file() {
        let path = AppConfig::path();
        assert!(path.ends_with("cursor-avoid/config.toml"));
    }
}
