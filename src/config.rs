//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, RoadRiskError};
use crate::risk::{DEFAULT_VISIBILITY, MAX_VISIBILITY};

/// Location of the optional configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Log levels accepted by `logging.level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sensor log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    #[serde(default = "default_sensor_path")]
    pub path: PathBuf,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Remote record configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_node")]
    pub node: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Risk evaluation configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RiskConfig {
    #[serde(default = "default_visibility")]
    pub visibility: u8,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to a daily rolling file in this directory instead of stdout
    #[serde(default)]
    pub log_dir: Option<String>,

    #[serde(default = "default_status_interval_ticks")]
    pub status_interval_ticks: u64,
}

// Default value functions
fn default_sensor_path() -> PathBuf { PathBuf::from("live_sensor.csv") }
fn default_poll_interval_ms() -> u64 { 1000 }

fn default_base_url() -> String {
    "https://roadrisklive-default-rtdb.asia-southeast1.firebasedatabase.app".to_string()
}
fn default_node() -> String { "live_area".to_string() }
fn default_timeout_ms() -> u64 { 5000 }

fn default_visibility() -> u8 { DEFAULT_VISIBILITY }

fn default_log_level() -> String { "info".to_string() }
fn default_status_interval_ticks() -> u64 { 60 }

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            path: default_sensor_path(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            node: default_node(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            visibility: default_visibility(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
            status_interval_ticks: default_status_interval_ticks(),
        }
    }
}

impl SensorConfig {
    /// Time between polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl RemoteConfig {
    /// Create a remote configuration
    pub fn new(base_url: impl Into<String>, node: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into(),
            node: node.into(),
            timeout_ms,
        }
    }

    /// URL of the record that is overwritten on every publish
    ///
    /// # Examples
    ///
    /// ```
    /// use road_risk_live::config::RemoteConfig;
    ///
    /// let remote = RemoteConfig::new("https://db.example.com/", "live_area", 5000);
    /// assert_eq!(remote.record_url(), "https://db.example.com/live_area.json");
    /// ```
    pub fn record_url(&self) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), self.node)
    }

    /// Upper bound on a single publish request
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use road_risk_live::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to built-in defaults when the file does not exist
    ///
    /// An existing but invalid file is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.sensor.path.as_os_str().is_empty() {
            return Err(invalid("sensor path cannot be empty"));
        }

        if self.sensor.poll_interval_ms == 0 || self.sensor.poll_interval_ms > 3_600_000 {
            return Err(invalid("poll_interval_ms must be between 1 and 3600000"));
        }

        if !(self.remote.base_url.starts_with("http://")
            || self.remote.base_url.starts_with("https://"))
        {
            return Err(invalid("base_url must start with http:// or https://"));
        }

        if self.remote.node.is_empty() {
            return Err(invalid("node cannot be empty"));
        }

        if self.remote.node.starts_with('/') || self.remote.node.ends_with('/') {
            return Err(invalid("node must not start or end with '/'"));
        }

        if self.remote.timeout_ms == 0 || self.remote.timeout_ms > 60_000 {
            return Err(invalid("timeout_ms must be between 1 and 60000"));
        }

        if self.risk.visibility > MAX_VISIBILITY {
            return Err(invalid(format!(
                "visibility must be between 0 and {}",
                MAX_VISIBILITY
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(format!(
                "log level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }

        if matches!(&self.logging.log_dir, Some(dir) if dir.is_empty()) {
            return Err(invalid("log_dir cannot be empty when set"));
        }

        if self.logging.status_interval_ticks == 0 {
            return Err(invalid("status_interval_ticks must be greater than 0"));
        }

        Ok(())
    }
}

fn invalid(msg: impl std::fmt::Display) -> RoadRiskError {
    RoadRiskError::Config(toml::de::Error::custom(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(toml_content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    fn assert_invalid(config: &Config, needle: &str) {
        match config.validate() {
            Err(RoadRiskError::Config(e)) => {
                assert!(
                    e.to_string().contains(needle),
                    "error {:?} should mention {:?}",
                    e.to_string(),
                    needle
                );
            }
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.sensor.path, PathBuf::from("live_sensor.csv"));
        assert_eq!(config.sensor.poll_interval(), Duration::from_secs(1));
        assert_eq!(
            config.remote.record_url(),
            "https://roadrisklive-default-rtdb.asia-southeast1.firebasedatabase.app/live_area.json"
        );
        assert_eq!(config.remote.timeout(), Duration::from_secs(5));
        assert_eq!(config.risk.visibility, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let file = write_config(
            r#"
[sensor]
path = "/var/lib/sensor/live.csv"
poll_interval_ms = 250

[remote]
base_url = "http://127.0.0.1:9000"
node = "areas/north"
timeout_ms = 1500

[risk]
visibility = 3

[logging]
level = "debug"
log_dir = "./logs"
status_interval_ticks = 10
"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sensor.path, PathBuf::from("/var/lib/sensor/live.csv"));
        assert_eq!(config.sensor.poll_interval_ms, 250);
        assert_eq!(config.remote.record_url(), "http://127.0.0.1:9000/areas/north.json");
        assert_eq!(config.remote.timeout_ms, 1500);
        assert_eq!(config.risk.visibility, 3);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_dir.as_deref(), Some("./logs"));
        assert_eq!(config.logging.status_interval_ticks, 10);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sensor.poll_interval_ms, 1000);
        assert_eq!(config.remote.node, "live_area");
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let file = write_config("[remote]\nnode = \"other\"\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.remote.node, "other");
        assert_eq!(config.remote.timeout_ms, 5000);
        assert!(config.remote.base_url.starts_with("https://"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.sensor.path, PathBuf::from("live_sensor.csv"));
    }

    #[test]
    fn test_load_or_default_rejects_invalid_file() {
        let file = write_config("[risk]\nvisibility = 11\n");
        assert!(Config::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[sensor\npath = ");
        assert!(matches!(
            Config::load(file.path()),
            Err(RoadRiskError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("absent.toml")),
            Err(RoadRiskError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_poll_interval() {
        let mut config = Config::default();
        config.sensor.poll_interval_ms = 0;
        assert_invalid(&config, "poll_interval_ms");

        config.sensor.poll_interval_ms = 3_600_001;
        assert_invalid(&config, "poll_interval_ms");
    }

    #[test]
    fn test_invalid_sensor_path() {
        let mut config = Config::default();
        config.sensor.path = PathBuf::new();
        assert_invalid(&config, "sensor path");
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.remote.base_url = "ftp://db.example.com".to_string();
        assert_invalid(&config, "base_url");
    }

    #[test]
    fn test_invalid_node() {
        let mut config = Config::default();
        config.remote.node = String::new();
        assert_invalid(&config, "node cannot be empty");

        config.remote.node = "/live_area".to_string();
        assert_invalid(&config, "node must not");

        config.remote.node = "live_area/".to_string();
        assert_invalid(&config, "node must not");
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = Config::default();
        config.remote.timeout_ms = 0;
        assert_invalid(&config, "timeout_ms");

        config.remote.timeout_ms = 60_001;
        assert_invalid(&config, "timeout_ms");
    }

    #[test]
    fn test_visibility_range() {
        let mut config = Config::default();
        config.risk.visibility = 0;
        assert!(config.validate().is_ok());

        config.risk.visibility = 10;
        assert!(config.validate().is_ok());

        config.risk.visibility = 11;
        assert_invalid(&config, "visibility");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert_invalid(&config, "log level");
    }

    #[test]
    fn test_invalid_log_dir() {
        let mut config = Config::default();
        config.logging.log_dir = Some(String::new());
        assert_invalid(&config, "log_dir");
    }

    #[test]
    fn test_invalid_status_interval() {
        let mut config = Config::default();
        config.logging.status_interval_ticks = 0;
        assert_invalid(&config, "status_interval_ticks");
    }

    #[test]
    fn test_record_url_trims_trailing_slash() {
        let remote = RemoteConfig::new("http://localhost:8080///", "live_area", 100);
        assert_eq!(remote.record_url(), "http://localhost:8080/live_area.json");
    }
}
