//! Configuration loading, saving and validation tests

use posture_assessment::classifier::RuleSet;
use posture_assessment::config::{Config, EXAMPLE_CONFIG};

#[test]
fn test_yaml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assessment.yaml");

    let mut config = Config::default();
    config.angles.knee.tolerance = 15.0;
    config.aggregation.allowed_failures = 2;

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.to_rule_set().allowed_failures, 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Config::from_file("/nonexistent/assessment.yaml");
    assert!(matches!(result, Err(posture_assessment::Error::IoError(_))));
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "angles: [not, a, mapping]").unwrap();

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(posture_assessment::Error::ConfigError(_))));
}

#[test]
fn test_example_config_is_valid_and_default() {
    let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.to_rule_set(), RuleSet::default());
}

#[test]
fn test_adjusted_thresholds_flow_into_rules() {
    let yaml = r"
angles:
  knee:
    target: 95.0
    tolerance: 20.0
";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let rules = config.to_rule_set();

    let knee = rules.thresholds[&posture_assessment::angle::AngleName::Knee];
    assert_eq!(knee.target, 95.0);
    assert_eq!(knee.tolerance, 20.0);
    // Untouched angles keep their defaults
    let hip = rules.thresholds[&posture_assessment::angle::AngleName::Hip];
    assert_eq!(hip.target, 98.0);
}
