//! Runtime configuration for the attendance core.
//!
//! # Responsibility
//! - Hold tracker settings (storage key, thresholds) and logging settings.
//! - Parse JSON configuration with defaults for omitted fields.
//!
//! # Invariants
//! - A validated `Thresholds` has `0 <= compliance <= excellent <= 100`.
//! - A validated `TrackerConfig` has a non-blank storage key.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Storage key the subject snapshot is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "attendanceTracker_subjects";
/// Minimum acceptable attendance percentage.
pub const COMPLIANCE_THRESHOLD: f64 = 75.0;
/// Percentage at or above which attendance is rated excellent.
pub const EXCELLENT_THRESHOLD: f64 = 85.0;

const DEFAULT_MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_LOG_FILES: usize = 5;

/// Configuration rejected by validation or parsing.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    BlankStorageKey,
    ThresholdOutOfRange { name: &'static str, value: f64 },
    ThresholdsInverted { compliance: f64, excellent: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid configuration: {err}"),
            Self::BlankStorageKey => write!(f, "storage_key must not be blank"),
            Self::ThresholdOutOfRange { name, value } => {
                write!(f, "{name} threshold {value} must be within 0..=100")
            }
            Self::ThresholdsInverted {
                compliance,
                excellent,
            } => write!(
                f,
                "excellent threshold {excellent} must be >= compliance threshold {compliance}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Percentage cut-offs used by alerts, insights and bands.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Subjects strictly below this value raise a compliance alert.
    pub compliance: f64,
    pub excellent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            compliance: COMPLIANCE_THRESHOLD,
            excellent: EXCELLENT_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Default excellent cut-off with a custom compliance threshold.
    ///
    /// The excellent cut-off is raised to `compliance` when needed.
    pub fn with_compliance(compliance: f64) -> Self {
        Self {
            compliance,
            excellent: EXCELLENT_THRESHOLD.max(compliance),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("compliance", self.compliance), ("excellent", self.excellent)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.excellent < self.compliance {
            return Err(ConfigError::ThresholdsInverted {
                compliance: self.compliance,
                excellent: self.excellent,
            });
        }
        Ok(())
    }
}

/// Settings for `AttendanceStore`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub storage_key: String,
    pub thresholds: Thresholds,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl TrackerConfig {
    /// Parses and validates a JSON document; omitted fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::BlankStorageKey);
        }
        self.thresholds.validate()
    }
}

/// Settings for the rolling file logger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            log_dir: PathBuf::new(),
            max_file_size_bytes: DEFAULT_MAX_LOG_FILE_SIZE_BYTES,
            max_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON document; omitted fields take defaults.
    ///
    /// Level and directory are checked by `logging::init_logging`.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, LoggingConfig, Thresholds, TrackerConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn empty_document_uses_defaults() {
        let config = TrackerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.thresholds.compliance, 75.0);
        assert_eq!(config.thresholds.excellent, 85.0);
    }

    #[test]
    fn partial_thresholds_keep_other_default() {
        let config =
            TrackerConfig::from_json_str(r#"{"thresholds": {"compliance": 80}}"#).unwrap();
        assert_eq!(config.thresholds.compliance, 80.0);
        assert_eq!(config.thresholds.excellent, 85.0);
    }

    #[test]
    fn rejects_blank_key_and_bad_thresholds() {
        let err = TrackerConfig::from_json_str(r#"{"storage_key": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BlankStorageKey));

        let err = Thresholds {
            compliance: 120.0,
            excellent: 130.0,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ThresholdOutOfRange {
                name: "compliance",
                ..
            }
        ));

        let err = Thresholds {
            compliance: 90.0,
            excellent: 80.0,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdsInverted { .. }));
    }

    #[test]
    fn with_compliance_never_inverts() {
        let thresholds = Thresholds::with_compliance(90.0);
        assert_eq!(thresholds.excellent, 90.0);
        thresholds.validate().unwrap();
    }

    #[test]
    fn logging_config_fills_rotation_defaults() {
        let config =
            LoggingConfig::from_json_str(r#"{"level": "warn", "log_dir": "/tmp/att"}"#).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.max_files, 5);
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
    }
}
