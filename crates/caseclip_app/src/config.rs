//! Typed application configuration.
//!
//! Loaded once at startup from an optional JSON file; missing keys fall back
//! to defaults, unknown keys are ignored. The engine never re-reads config.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use caseclip_engine::{MonitorSettings, SaveSettings};
use serde::Deserialize;

const DEFAULT_CONFIG_FILENAME: &str = "caseclip.json";

/// Notice produced while loading config. Loading happens before the logger
/// exists, so notices are carried back and reported after logger init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadNotice {
    Info(String),
    Warn(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_directory: PathBuf,
    /// Seconds between clipboard polls.
    pub polling_interval: f64,
    pub file_encoding: String,
    pub enable_notifications: bool,
    pub auto_create_directory: bool,
    pub log_level: String,
    pub max_file_size_mb: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("casedata"),
            polling_interval: 1.0,
            file_encoding: "utf-8".to_string(),
            enable_notifications: true,
            auto_create_directory: true,
            log_level: "info".to_string(),
            max_file_size_mb: 10,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from `./caseclip.json` when no path is given.
    /// A missing file means defaults; an unreadable or malformed file is
    /// reported through the returned notices and also falls back to defaults.
    pub fn load(path: Option<&Path>) -> (Self, Vec<LoadNotice>) {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let notice =
                    LoadNotice::Info(format!("no config at {}, using defaults", path.display()));
                return (Self::default(), vec![notice]);
            }
            Err(err) => {
                let notice = LoadNotice::Warn(format!(
                    "could not read {}: {}. Using defaults.",
                    path.display(),
                    err
                ));
                return (Self::default(), vec![notice]);
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => {
                let notice = LoadNotice::Info(format!("loaded config from {}", path.display()));
                (config, vec![notice])
            }
            Err(err) => {
                let notice = LoadNotice::Warn(format!(
                    "could not parse {}: {}. Using defaults.",
                    path.display(),
                    err
                ));
                (Self::default(), vec![notice])
            }
        }
    }

    /// Startup validation; a bad value here is a hard error, not a fallback.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.polling_interval.is_finite() || self.polling_interval <= 0.0 {
            bail!("polling_interval must be a positive number of seconds");
        }
        let encoding = self.file_encoding.to_ascii_lowercase();
        if encoding != "utf-8" && encoding != "utf8" {
            bail!(
                "file_encoding {:?} is not supported; content files are written UTF-8",
                self.file_encoding
            );
        }
        if self.max_file_size_mb == 0 {
            bail!("max_file_size_mb must be at least 1");
        }
        self.parse_log_level()
            .context("log_level must be one of off/error/warn/info/debug/trace")?;
        Ok(())
    }

    pub fn parse_log_level(&self) -> anyhow::Result<log::LevelFilter> {
        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(anyhow::Error::from)
    }

    pub fn save_settings(&self) -> SaveSettings {
        let mut settings = SaveSettings::new(self.output_directory.clone());
        settings.auto_create_dir = self.auto_create_directory;
        settings.max_content_bytes = self.max_file_size_mb * 1024 * 1024;
        settings.file_encoding = self.file_encoding.clone();
        settings
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            polling_interval: Duration::from_secs_f64(self.polling_interval),
            start_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let (config, _) = AppConfig::load(Some(&temp.path().join("absent.json")));
        assert_eq!(config.polling_interval, 1.0);
        assert!(config.auto_create_directory);
    }

    #[test]
    fn load_notices_are_returned_for_later_reporting() {
        let temp = tempfile::TempDir::new().unwrap();

        let (_, notices) = AppConfig::load(Some(&temp.path().join("absent.json")));
        assert_eq!(notices.len(), 1);
        assert!(matches!(
            &notices[0],
            LoadNotice::Info(message) if message.contains("using defaults")
        ));

        let path = temp.path().join("caseclip.json");
        fs::write(&path, "{ not json").unwrap();
        let (_, notices) = AppConfig::load(Some(&path));
        assert!(matches!(
            &notices[0],
            LoadNotice::Warn(message) if message.contains("could not parse")
        ));
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("caseclip.json");
        fs::write(
            &path,
            r#"{ "output_directory": "/tmp/cases", "polling_interval": 0.5 }"#,
        )
        .unwrap();

        let (config, _) = AppConfig::load(Some(&path));

        assert_eq!(config.output_directory, PathBuf::from("/tmp/cases"));
        assert_eq!(config.polling_interval, 0.5);
        // Untouched keys keep their defaults.
        assert_eq!(config.file_encoding, "utf-8");
        assert_eq!(config.max_file_size_mb, 10);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("caseclip.json");
        fs::write(&path, "{ not json").unwrap();

        let (config, _) = AppConfig::load(Some(&path));
        assert_eq!(config.output_directory, PathBuf::from("casedata"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.polling_interval = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.file_encoding = "latin-1".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn settings_conversions_carry_config_values() {
        let mut config = AppConfig::default();
        config.max_file_size_mb = 2;
        config.auto_create_directory = false;
        config.polling_interval = 0.25;

        let save = config.save_settings();
        assert_eq!(save.max_content_bytes, 2 * 1024 * 1024);
        assert!(!save.auto_create_dir);

        let monitor = config.monitor_settings();
        assert_eq!(monitor.polling_interval, Duration::from_millis(250));
    }
}
