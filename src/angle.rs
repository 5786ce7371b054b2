//! Joint angle computation from landmark points.
//!
//! All angles are unsigned interior angles: the angle at a vertex between
//! the rays to two other points, in degrees, in `[0, 180]`. Missing or
//! degenerate input never raises; it yields [`AngleResult::Indeterminate`],
//! which downstream classification surfaces as "could not assess".

use crate::landmarks::{Joint, LandmarkSet, Point2D, Side};
use std::collections::HashMap;

/// Names of the posture angles the assessment measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleName {
    /// Knee flexion, vertex at the knee
    Knee,
    /// Hip flexion, vertex at the hip
    Hip,
    /// Elbow flexion, vertex at the elbow
    Elbow,
    /// Head-to-shoulder alignment, vertex at the shoulder
    Neck,
}

impl AngleName {
    /// All measured angles
    pub const ALL: [Self; 4] = [Self::Knee, Self::Hip, Self::Elbow, Self::Neck];

    /// Human-readable description for reports
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Knee => "Knee angle",
            Self::Hip => "Hip angle",
            Self::Elbow => "Elbow angle",
            Self::Neck => "Head to shoulder angle",
        }
    }
}

impl std::fmt::Display for AngleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Knee => "knee",
            Self::Hip => "hip",
            Self::Elbow => "elbow",
            Self::Neck => "neck",
        };
        write!(f, "{name}")
    }
}

/// Outcome of one angle measurement.
///
/// `Indeterminate` means the angle could not be computed (a landmark was
/// missing or the points were degenerate). It must never be treated as a
/// numeric value downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleResult {
    /// Measured angle in degrees, in `[0, 180]`
    Measured(f64),
    /// The angle could not be computed
    Indeterminate,
}

impl AngleResult {
    /// The measured value, or `None` if indeterminate
    #[must_use]
    pub fn degrees(self) -> Option<f64> {
        match self {
            Self::Measured(deg) => Some(deg),
            Self::Indeterminate => None,
        }
    }

    /// Whether a value was actually measured
    #[must_use]
    pub fn is_measured(self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// Interior angle at vertex `b` formed by the rays `b→a` and `b→c`, in
/// degrees, in the closed range `[0, 180]`.
///
/// Coincident points (a zero-length ray) make the angle undefined and
/// return [`AngleResult::Indeterminate`]. The cosine is clamped to
/// `[-1, 1]` before `acos` so floating-point rounding near collinear
/// configurations cannot push it out of domain.
#[must_use]
pub fn interior_angle(a: Point2D, b: Point2D, c: Point2D) -> AngleResult {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 == 0.0 || mag2 == 0.0 {
        return AngleResult::Indeterminate;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    AngleResult::Measured(cos.acos().to_degrees())
}

/// The three joints forming a named angle, ordered `[a, vertex, c]`.
///
/// Side-agnostic; the caller applies one side to all three joints when
/// looking up landmark coordinates.
#[must_use]
pub const fn joint_triple(angle: AngleName) -> [Joint; 3] {
    match angle {
        AngleName::Knee => [Joint::Hip, Joint::Knee, Joint::Ankle],
        AngleName::Hip => [Joint::Shoulder, Joint::Hip, Joint::Knee],
        AngleName::Elbow => [Joint::Shoulder, Joint::Elbow, Joint::Wrist],
        AngleName::Neck => [Joint::Ear, Joint::Shoulder, Joint::Hip],
    }
}

/// Measure every posture angle for one side of the body.
///
/// Angles whose landmarks were not all detected come back as
/// [`AngleResult::Indeterminate`]; a partially occluded subject is an
/// expected input, not an error.
#[must_use]
pub fn measure_posture_angles(landmarks: &LandmarkSet, side: Side) -> HashMap<AngleName, AngleResult> {
    let mut angles = HashMap::with_capacity(AngleName::ALL.len());

    for name in AngleName::ALL {
        let [ja, jb, jc] = joint_triple(name);
        let result = match (landmarks.get(side, ja), landmarks.get(side, jb), landmarks.get(side, jc)) {
            (Some(a), Some(b), Some(c)) => interior_angle(a, b, c),
            _ => {
                log::debug!("{side} {name} angle indeterminate: landmark(s) missing");
                AngleResult::Indeterminate
            }
        };
        angles.insert(name, result);
    }

    angles
}
