//! Application configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FaceTriggerError, FaceTriggerResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Detector thresholds and combination policy.
    pub detection: DetectionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Settings consumed when an engine builds its detector set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// One activation threshold per detector kind.
    pub thresholds: Thresholds,

    /// How paired (left/right) detectors report simultaneous transitions.
    pub paired_policy: PairedPolicy,
}

/// Activation thresholds, one per detector kind.
///
/// A coefficient counts as active when it is greater than or equal to its
/// threshold. Every value must lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub smile: f32,
    pub blink: f32,
    pub brow_down: f32,
    pub brow_up: f32,
    pub mouth_pucker: f32,
    pub jaw_open: f32,
    pub squint: f32,
    pub cheek_puff: f32,
    pub jaw_left: f32,
    pub jaw_right: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            smile: 0.7,
            blink: 0.8,
            brow_down: 0.25,
            brow_up: 0.95,
            mouth_pucker: 0.7,
            jaw_open: 0.9,
            squint: 0.8,
            cheek_puff: 0.7,
            jaw_left: 0.7,
            jaw_right: 0.7,
        }
    }
}

impl Thresholds {
    /// Named view over every threshold, in detector construction order.
    pub fn entries(&self) -> [(&'static str, f32); 10] {
        [
            ("smile", self.smile),
            ("blink", self.blink),
            ("brow_down", self.brow_down),
            ("brow_up", self.brow_up),
            ("mouth_pucker", self.mouth_pucker),
            ("jaw_open", self.jaw_open),
            ("squint", self.squint),
            ("cheek_puff", self.cheek_puff),
            ("jaw_left", self.jaw_left),
            ("jaw_right", self.jaw_right),
        ]
    }

    /// Check that every threshold is a finite value in `[0.0, 1.0]`.
    pub fn validate(&self) -> FaceTriggerResult<()> {
        for (name, value) in self.entries() {
            if !(0.0..=1.0).contains(&value) {
                return Err(FaceTriggerError::config(format!(
                    "threshold `{name}` must be within [0.0, 1.0], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Reporting policy for paired detectors when several of their signals
/// change on the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairedPolicy {
    /// At most one event group per frame: compound, then left, then right.
    /// A simultaneous left+right change that leaves the compound unchanged
    /// reports only the left side.
    #[default]
    Prioritized,

    /// Each present side reports on its own, and the compound is reported
    /// only on frames where both sides are present.
    Independent,
}

impl PairedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prioritized => "prioritized",
            Self::Independent => "independent",
        }
    }
}

impl fmt::Display for PairedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairedPolicy {
    type Err = FaceTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prioritized" => Ok(Self::Prioritized),
            "independent" => Ok(Self::Independent),
            other => Err(FaceTriggerError::config(format!(
                "unknown paired policy `{other}` (expected prioritized|independent)"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "facetrigger=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// Logs a warning when an existing file is ignored. Binaries that load
    /// config before installing a subscriber should use
    /// [`AppConfig::load_or_default`] and report the reason themselves.
    pub fn load() -> Self {
        let (config, ignored) = Self::load_or_default();
        if let Some(e) = ignored {
            tracing::warn!("Ignoring config at {:?}: {}", config_file_path(), e);
        }
        config
    }

    /// Load config from the standard location. When the file exists but
    /// cannot be used, returns defaults together with the reason.
    pub fn load_or_default() -> (Self, Option<FaceTriggerError>) {
        Self::load_or_default_from(config_file_path())
    }

    /// Like [`AppConfig::load_or_default`] for an explicit path. A missing
    /// file is not an error.
    pub fn load_or_default_from(path: impl AsRef<Path>) -> (Self, Option<FaceTriggerError>) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> FaceTriggerResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FaceTriggerError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.detection.thresholds.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> FaceTriggerResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config as pretty JSON to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> FaceTriggerResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("facetrigger").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("facetrigger-config-{}-{name}", std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_default_thresholds_match_tracker_tuning() {
        let t = Thresholds::default();
        assert_eq!(t.smile, 0.7);
        assert_eq!(t.blink, 0.8);
        assert_eq!(t.brow_down, 0.25);
        assert_eq!(t.brow_up, 0.95);
        assert_eq!(t.mouth_pucker, 0.7);
        assert_eq!(t.jaw_open, 0.9);
        assert_eq!(t.squint, 0.8);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let t = Thresholds {
            blink: 1.2,
            ..Default::default()
        };
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("blink"));

        let t = Thresholds {
            smile: f32::NAN,
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "detection": { "thresholds": { "smile": 0.5 } } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.detection.thresholds.smile, 0.5);
        assert_eq!(config.detection.thresholds.blink, 0.8);
        assert_eq!(config.detection.paired_policy, PairedPolicy::Prioritized);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_paired_policy_parsing() {
        assert_eq!(
            "Independent".parse::<PairedPolicy>().unwrap(),
            PairedPolicy::Independent
        );
        assert_eq!(
            "prioritized".parse::<PairedPolicy>().unwrap(),
            PairedPolicy::Prioritized
        );
        assert!("both".parse::<PairedPolicy>().is_err());

        let json = serde_json::to_string(&PairedPolicy::Independent).unwrap();
        assert_eq!(json, "\"independent\"");
    }

    #[test]
    fn test_save_then_load_from_path() {
        let path = scratch_path("save-load");
        let mut config = AppConfig::default();
        config.detection.thresholds.jaw_open = 0.6;
        config.detection.paired_policy = PairedPolicy::Independent;

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_config_falls_back_with_reason() {
        let path = scratch_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ \"detection\": ").unwrap();

        let (config, ignored) = AppConfig::load_or_default_from(&path);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(ignored, Some(FaceTriggerError::Json(_))));

        std::fs::write(&path, r#"{ "detection": { "thresholds": { "blink": 2.0 } } }"#).unwrap();
        let (_, ignored) = AppConfig::load_or_default_from(&path);
        let reason = ignored.unwrap().to_string();
        assert!(reason.contains("blink"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_absent_config_is_not_reported() {
        let (config, ignored) = AppConfig::load_or_default_from(scratch_path("absent"));
        assert_eq!(config, AppConfig::default());
        assert!(ignored.is_none());
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = scratch_path("missing");
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, FaceTriggerError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_rejects_invalid_threshold() {
        let path = scratch_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "detection": { "thresholds": { "squint": -0.1 } } }"#)
            .unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, FaceTriggerError::Config { .. }));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
