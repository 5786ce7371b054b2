//! Rule-based posture classification.
//!
//! Each measured angle is checked against a tolerance band around a target
//! value, and the per-angle verdicts aggregate into one ordinal rating. The
//! rules are plain data passed on every call; there is no global threshold
//! state, so concurrent assessments with different settings never interfere.

use crate::angle::{AngleName, AngleResult};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Acceptance band for one angle: target value plus symmetric tolerance.
///
/// A measurement passes iff it lies in `[target - tolerance,
/// target + tolerance]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    /// Target angle in degrees, in `[0, 180]`
    pub target: f64,
    /// Allowed deviation in degrees, non-negative
    pub tolerance: f64,
}

impl ThresholdSpec {
    /// Create a threshold from target and tolerance
    #[must_use]
    pub const fn new(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }

    /// Inclusive acceptance interval `(low, high)`
    #[must_use]
    pub fn band(self) -> (f64, f64) {
        (self.target - self.tolerance, self.target + self.tolerance)
    }

    /// Whether a measured angle falls inside the acceptance band
    #[must_use]
    pub fn contains(self, degrees: f64) -> bool {
        let (low, high) = self.band();
        (low..=high).contains(&degrees)
    }

    fn validate(self, name: AngleName) -> Result<()> {
        if !(0.0..=180.0).contains(&self.target) || !self.target.is_finite() {
            return Err(Error::ConfigError(format!(
                "{name} target must be between 0 and 180 degrees, got {}",
                self.target
            )));
        }
        if self.tolerance < 0.0 || !self.tolerance.is_finite() {
            return Err(Error::ConfigError(format!(
                "{name} tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Full classification configuration: one threshold per assessed angle plus
/// the aggregation boundary between "mostly ergonomic" and "non-ergonomic".
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Acceptance band per angle
    pub thresholds: HashMap<AngleName, ThresholdSpec>,
    /// Maximum number of failing angles still rated "mostly ergonomic"
    pub allowed_failures: usize,
}

impl Default for RuleSet {
    /// Ergonomic guideline defaults: knee 90°±10°, hip 98°±8°, elbow 95°±5°,
    /// neck 160°±10°, one failing angle tolerated.
    fn default() -> Self {
        let mut thresholds = HashMap::new();
        thresholds.insert(AngleName::Knee, ThresholdSpec::new(90.0, 10.0));
        thresholds.insert(AngleName::Hip, ThresholdSpec::new(98.0, 8.0));
        thresholds.insert(AngleName::Elbow, ThresholdSpec::new(95.0, 5.0));
        thresholds.insert(AngleName::Neck, ThresholdSpec::new(160.0, 10.0));
        Self {
            thresholds,
            allowed_failures: 1,
        }
    }
}

impl RuleSet {
    /// Validate every threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if any tolerance is negative or any
    /// target lies outside `[0, 180]` degrees.
    pub fn validate(&self) -> Result<()> {
        for (&name, &spec) in &self.thresholds {
            spec.validate(name)?;
        }
        Ok(())
    }
}

/// Verdict for a single angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleVerdict {
    /// Measured and inside the acceptance band
    Pass,
    /// Measured but outside the acceptance band
    Fail,
    /// Could not be measured; distinct from both pass and fail
    Indeterminate,
}

/// Overall ordinal posture rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OverallRating {
    /// Every assessed angle is within tolerance
    Ergonomic,
    /// A small number of angles are out of tolerance
    MostlyErgonomic,
    /// Too many angles out of tolerance, or some could not be assessed
    NonErgonomic,
}

impl std::fmt::Display for OverallRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ergonomic => write!(f, "Ergonomic"),
            Self::MostlyErgonomic => write!(f, "Mostly ergonomic"),
            Self::NonErgonomic => write!(f, "Non-ergonomic"),
        }
    }
}

/// Evaluation detail for one angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Pass, fail or indeterminate
    pub verdict: AngleVerdict,
    /// The measured angle, if one was available
    pub measured: Option<f64>,
    /// Absolute deviation from the target, if measured
    pub deviation: Option<f64>,
}

/// Result of one classification call: per-angle evaluations plus the
/// aggregated rating. Regenerated fresh for every call, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictSet {
    evaluations: HashMap<AngleName, Evaluation>,
    overall: OverallRating,
}

impl VerdictSet {
    /// The aggregated posture rating
    #[must_use]
    pub fn overall(&self) -> OverallRating {
        self.overall
    }

    /// Evaluation detail for one angle, if it was configured
    #[must_use]
    pub fn evaluation(&self, name: AngleName) -> Option<Evaluation> {
        self.evaluations.get(&name).copied()
    }

    /// Verdict for one angle, if it was configured
    #[must_use]
    pub fn verdict(&self, name: AngleName) -> Option<AngleVerdict> {
        self.evaluation(name).map(|e| e.verdict)
    }

    /// Iterate over all per-angle evaluations
    pub fn iter(&self) -> impl Iterator<Item = (AngleName, Evaluation)> + '_ {
        self.evaluations.iter().map(|(&name, &eval)| (name, eval))
    }

    /// Number of angles with each verdict, as (pass, fail, indeterminate)
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for eval in self.evaluations.values() {
            match eval.verdict {
                AngleVerdict::Pass => counts.0 += 1,
                AngleVerdict::Fail => counts.1 += 1,
                AngleVerdict::Indeterminate => counts.2 += 1,
            }
        }
        counts
    }

    /// Percentage of configured angles that passed, for batch summaries
    #[must_use]
    pub fn score_percent(&self) -> f64 {
        if self.evaluations.is_empty() {
            return 0.0;
        }
        let (pass, _, _) = self.counts();
        100.0 * pass as f64 / self.evaluations.len() as f64
    }

    /// Render a textual report: one line per angle plus the overall rating.
    ///
    /// Failing angles include their deviation and adjustment advice;
    /// indeterminate angles are reported as not assessable rather than bad.
    #[must_use]
    pub fn report(&self, rules: &RuleSet) -> Vec<String> {
        let mut lines = Vec::new();
        // Fixed order keeps reports stable across runs
        for name in AngleName::ALL {
            let Some(eval) = self.evaluation(name) else {
                continue;
            };
            match eval.verdict {
                AngleVerdict::Pass => {
                    if let Some(measured) = eval.measured {
                        lines.push(format!("{} is good ({measured:.1}°).", name.description()));
                    }
                }
                AngleVerdict::Fail => {
                    if let (Some(measured), Some(deviation), Some(spec)) =
                        (eval.measured, eval.deviation, rules.thresholds.get(&name))
                    {
                        lines.push(format!(
                            "{} is out of range by {deviation:.1}° (measured {measured:.1}°, target ~{}° ±{}).",
                            name.description(),
                            spec.target,
                            spec.tolerance
                        ));
                        for tip in advice(name) {
                            lines.push(format!("Try: {tip}"));
                        }
                    }
                }
                AngleVerdict::Indeterminate => {
                    lines.push(format!("Could not assess {}.", name.description().to_lowercase()));
                }
            }
        }
        lines.push(format!("Overall assessment: {}", self.overall));
        lines
    }
}

/// Adjustment advice shown when an angle is out of its acceptance band
#[must_use]
pub fn advice(name: AngleName) -> &'static [&'static str] {
    match name {
        AngleName::Knee => &["Lower or raise your seat so that the knee is around 90°."],
        AngleName::Hip => &["Adjust seat depth or desk height to achieve approximately 98° at the hips."],
        AngleName::Elbow => &["Adjust the armrest height so that your elbows are about 95°."],
        AngleName::Neck => &[
            "Raise or lower your monitor to reduce neck bending.",
            "Keep your head upright; adjust the screen distance.",
        ],
    }
}

/// Classify measured angles against a rule set.
///
/// Every angle named in `rules.thresholds` is evaluated; an angle with no
/// measurement (absent from `angles`, or indeterminate) gets an
/// indeterminate verdict. Aggregation precedence: all angles pass →
/// [`OverallRating::Ergonomic`]; otherwise, if nothing is indeterminate and
/// at most `allowed_failures` angles fail → [`OverallRating::MostlyErgonomic`];
/// otherwise → [`OverallRating::NonErgonomic`]. An indeterminate angle never
/// counts as a pass.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the rule set is invalid (negative
/// tolerance or target outside `[0, 180]`). Missing or degenerate
/// measurements are expected inputs and never produce an error.
pub fn classify(angles: &HashMap<AngleName, AngleResult>, rules: &RuleSet) -> Result<VerdictSet> {
    rules.validate()?;

    let mut evaluations = HashMap::with_capacity(rules.thresholds.len());
    for (&name, &spec) in &rules.thresholds {
        let measurement = angles.get(&name).copied().unwrap_or(AngleResult::Indeterminate);
        let eval = match measurement.degrees() {
            Some(measured) => {
                let verdict = if spec.contains(measured) {
                    AngleVerdict::Pass
                } else {
                    AngleVerdict::Fail
                };
                Evaluation {
                    verdict,
                    measured: Some(measured),
                    deviation: Some((measured - spec.target).abs()),
                }
            }
            None => Evaluation {
                verdict: AngleVerdict::Indeterminate,
                measured: None,
                deviation: None,
            },
        };
        evaluations.insert(name, eval);
    }

    let fail_count = evaluations
        .values()
        .filter(|e| e.verdict == AngleVerdict::Fail)
        .count();
    let indeterminate_count = evaluations
        .values()
        .filter(|e| e.verdict == AngleVerdict::Indeterminate)
        .count();

    let overall = if fail_count == 0 && indeterminate_count == 0 {
        OverallRating::Ergonomic
    } else if indeterminate_count == 0 && fail_count <= rules.allowed_failures {
        OverallRating::MostlyErgonomic
    } else {
        OverallRating::NonErgonomic
    };

    log::debug!(
        "classified posture: {overall} ({fail_count} failing, {indeterminate_count} indeterminate)"
    );

    Ok(VerdictSet { evaluations, overall })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured_angles(knee: f64, hip: f64, elbow: f64, neck: f64) -> HashMap<AngleName, AngleResult> {
        let mut angles = HashMap::new();
        angles.insert(AngleName::Knee, AngleResult::Measured(knee));
        angles.insert(AngleName::Hip, AngleResult::Measured(hip));
        angles.insert(AngleName::Elbow, AngleResult::Measured(elbow));
        angles.insert(AngleName::Neck, AngleResult::Measured(neck));
        angles
    }

    #[test]
    fn test_threshold_band_inclusive() {
        let spec = ThresholdSpec::new(90.0, 10.0);
        assert!(spec.contains(80.0));
        assert!(spec.contains(100.0));
        assert!(spec.contains(90.0));
        assert!(!spec.contains(79.999));
        assert!(!spec.contains(100.001));
    }

    #[test]
    fn test_zero_tolerance_exact_match_only() {
        let spec = ThresholdSpec::new(90.0, 0.0);
        assert!(spec.contains(90.0));
        assert!(!spec.contains(90.0001));
    }

    #[test]
    fn test_all_pass_is_ergonomic() {
        let angles = measured_angles(92.0, 100.0, 94.0, 158.0);
        let verdicts = classify(&angles, &RuleSet::default()).unwrap();
        assert_eq!(verdicts.overall(), OverallRating::Ergonomic);
        assert_eq!(verdicts.counts(), (4, 0, 0));
        assert!((verdicts.score_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_failure_is_mostly_ergonomic() {
        let angles = measured_angles(70.0, 100.0, 94.0, 158.0);
        let verdicts = classify(&angles, &RuleSet::default()).unwrap();
        assert_eq!(verdicts.verdict(AngleName::Knee), Some(AngleVerdict::Fail));
        assert_eq!(verdicts.overall(), OverallRating::MostlyErgonomic);
    }

    #[test]
    fn test_two_failures_is_non_ergonomic() {
        let angles = measured_angles(70.0, 70.0, 94.0, 158.0);
        let verdicts = classify(&angles, &RuleSet::default()).unwrap();
        assert_eq!(verdicts.counts(), (2, 2, 0));
        assert_eq!(verdicts.overall(), OverallRating::NonErgonomic);
    }

    #[test]
    fn test_allowed_failures_boundary() {
        let angles = measured_angles(70.0, 70.0, 94.0, 158.0);
        let mut rules = RuleSet::default();
        rules.allowed_failures = 2;
        let verdicts = classify(&angles, &rules).unwrap();
        assert_eq!(verdicts.overall(), OverallRating::MostlyErgonomic);

        rules.allowed_failures = 0;
        let one_fail = measured_angles(70.0, 100.0, 94.0, 158.0);
        let verdicts = classify(&one_fail, &rules).unwrap();
        assert_eq!(verdicts.overall(), OverallRating::NonErgonomic);
    }

    #[test]
    fn test_indeterminate_forces_downgrade() {
        let mut angles = measured_angles(92.0, 100.0, 94.0, 158.0);
        angles.insert(AngleName::Knee, AngleResult::Indeterminate);

        let verdicts = classify(&angles, &RuleSet::default()).unwrap();
        assert_eq!(verdicts.verdict(AngleName::Knee), Some(AngleVerdict::Indeterminate));
        // Never a pass, and worse than plain Ergonomic even if all else is fine
        assert!(verdicts.overall() > OverallRating::Ergonomic);
        assert_eq!(verdicts.overall(), OverallRating::NonErgonomic);
    }

    #[test]
    fn test_unmeasured_angle_is_indeterminate() {
        let mut angles = measured_angles(92.0, 100.0, 94.0, 158.0);
        angles.remove(&AngleName::Neck);

        let verdicts = classify(&angles, &RuleSet::default()).unwrap();
        assert_eq!(verdicts.verdict(AngleName::Neck), Some(AngleVerdict::Indeterminate));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let angles = measured_angles(70.0, 100.0, 94.0, 158.0);
        let rules = RuleSet::default();
        let first = classify(&angles, &rules).unwrap();
        let second = classify(&angles, &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_widening_tolerance_never_fails_a_pass() {
        let angles = measured_angles(79.0, 100.0, 94.0, 158.0);
        let mut rules = RuleSet::default();
        let before = classify(&angles, &rules).unwrap();
        assert_eq!(before.verdict(AngleName::Knee), Some(AngleVerdict::Fail));

        rules
            .thresholds
            .insert(AngleName::Knee, ThresholdSpec::new(90.0, 12.0));
        let after = classify(&angles, &rules).unwrap();
        assert_eq!(after.verdict(AngleName::Knee), Some(AngleVerdict::Pass));
        // Angles that passed before still pass
        for name in [AngleName::Hip, AngleName::Elbow, AngleName::Neck] {
            assert_eq!(after.verdict(name), Some(AngleVerdict::Pass));
        }
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut rules = RuleSet::default();
        rules
            .thresholds
            .insert(AngleName::Knee, ThresholdSpec::new(90.0, -1.0));
        let angles = measured_angles(92.0, 100.0, 94.0, 158.0);
        assert!(matches!(classify(&angles, &rules), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_out_of_range_target_rejected() {
        let mut rules = RuleSet::default();
        rules
            .thresholds
            .insert(AngleName::Neck, ThresholdSpec::new(200.0, 10.0));
        let angles = measured_angles(92.0, 100.0, 94.0, 158.0);
        assert!(matches!(classify(&angles, &rules), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_report_lines() {
        let mut angles = measured_angles(70.0, 100.0, 94.0, 158.0);
        angles.insert(AngleName::Elbow, AngleResult::Indeterminate);
        let rules = RuleSet::default();
        let verdicts = classify(&angles, &rules).unwrap();
        let report = verdicts.report(&rules);

        assert!(report.iter().any(|l| l.contains("Knee angle is out of range by 20.0°")));
        assert!(report.iter().any(|l| l.starts_with("Try: Lower or raise your seat")));
        assert!(report.iter().any(|l| l.contains("Could not assess elbow angle")));
        assert!(report.last().unwrap().contains("Non-ergonomic"));
    }
}
