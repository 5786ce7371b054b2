//! Configuration management for posture assessment
//!
//! Thresholds are meant to be user-adjustable (e.g. edited in a settings
//! form or a YAML file); the config converts into a [`RuleSet`] that is
//! passed explicitly to every classification call.

use crate::angle::AngleName;
use crate::classifier::{RuleSet, ThresholdSpec};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Assessment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-angle acceptance bands
    pub angles: AngleThresholds,

    /// Verdict aggregation parameters
    pub aggregation: AggregationConfig,
}

/// Acceptance band per assessed angle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleThresholds {
    /// Knee angle band (hip-knee-ankle)
    pub knee: ThresholdSpec,

    /// Hip angle band (shoulder-hip-knee)
    pub hip: ThresholdSpec,

    /// Elbow angle band (shoulder-elbow-wrist)
    pub elbow: ThresholdSpec,

    /// Neck angle band (ear-shoulder-hip)
    pub neck: ThresholdSpec,
}

/// Verdict aggregation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum number of failing angles still rated "mostly ergonomic"
    pub allowed_failures: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angles: AngleThresholds::default(),
            aggregation: AggregationConfig::default(),
        }
    }
}

impl Default for AngleThresholds {
    fn default() -> Self {
        Self {
            knee: ThresholdSpec::new(90.0, 10.0),
            hip: ThresholdSpec::new(98.0, 8.0),
            elbow: ThresholdSpec::new(95.0, 5.0),
            neck: ThresholdSpec::new(160.0, 10.0),
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { allowed_failures: 1 }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// valid configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Build the rule set this configuration describes
    #[must_use]
    pub fn to_rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::default();
        rules.thresholds.insert(AngleName::Knee, self.angles.knee);
        rules.thresholds.insert(AngleName::Hip, self.angles.hip);
        rules.thresholds.insert(AngleName::Elbow, self.angles.elbow);
        rules.thresholds.insert(AngleName::Neck, self.angles.neck);
        rules.allowed_failures = self.aggregation.allowed_failures;
        rules
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] for a negative tolerance or a target
    /// outside `[0, 180]` degrees.
    pub fn validate(&self) -> Result<()> {
        self.to_rule_set().validate()
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Posture Assessment Configuration

# Acceptance band per angle (degrees)
angles:
  knee:
    target: 90.0
    tolerance: 10.0
  hip:
    target: 98.0
    tolerance: 8.0
  elbow:
    target: 95.0
    tolerance: 5.0
  neck:
    target: 160.0
    tolerance: 10.0

# Verdict aggregation
aggregation:
  allowed_failures: 1
"#;
