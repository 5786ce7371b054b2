//! Body landmark vocabulary and per-image landmark storage.
//!
//! A [`LandmarkSet`] holds the joint coordinates an external pose detector
//! produced for one subject in one image. Joints the detector could not
//! locate are simply absent; every lookup returns an `Option` so absence
//! propagates explicitly instead of as a sentinel coordinate.

use std::collections::HashMap;

/// A 2D point in image coordinates (origin top-left, y increasing downward).
///
/// Coordinates may be pixels or normalized to `[0, 1]`; the geometry is
/// scale-invariant either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Body side qualifier for a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Subject's left side
    Left,
    /// Subject's right side
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Anatomical joints recognized by the assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    /// Ear
    Ear,
    /// Shoulder
    Shoulder,
    /// Elbow
    Elbow,
    /// Wrist
    Wrist,
    /// Hip
    Hip,
    /// Knee
    Knee,
    /// Ankle
    Ankle,
}

impl Joint {
    /// All joints the assessment can consume, in detector index order
    pub const ALL: [Self; 7] = [
        Self::Ear,
        Self::Shoulder,
        Self::Elbow,
        Self::Wrist,
        Self::Hip,
        Self::Knee,
        Self::Ankle,
    ];
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ear => "ear",
            Self::Shoulder => "shoulder",
            Self::Elbow => "elbow",
            Self::Wrist => "wrist",
            Self::Hip => "hip",
            Self::Knee => "knee",
            Self::Ankle => "ankle",
        };
        write!(f, "{name}")
    }
}

/// MediaPipe Pose landmark index for a sided joint.
///
/// This is the numbering the upstream detector uses for the joints this
/// crate consumes (ears 7/8, shoulders 11/12, elbows 13/14, wrists 15/16,
/// hips 23/24, knees 25/26, ankles 27/28).
#[must_use]
pub const fn pose_index(side: Side, joint: Joint) -> u32 {
    let left = match joint {
        Joint::Ear => 7,
        Joint::Shoulder => 11,
        Joint::Elbow => 13,
        Joint::Wrist => 15,
        Joint::Hip => 23,
        Joint::Knee => 25,
        Joint::Ankle => 27,
    };
    match side {
        Side::Left => left,
        Side::Right => left + 1,
    }
}

/// Inverse of [`pose_index`]: map a detector landmark index back to a sided
/// joint. Returns `None` for indices outside the supported vocabulary
/// (face mesh points, fingers, feet).
#[must_use]
pub const fn joint_from_pose_index(index: u32) -> Option<(Side, Joint)> {
    let joint = match index {
        7 | 8 => Joint::Ear,
        11 | 12 => Joint::Shoulder,
        13 | 14 => Joint::Elbow,
        15 | 16 => Joint::Wrist,
        23 | 24 => Joint::Hip,
        25 | 26 => Joint::Knee,
        27 | 28 => Joint::Ankle,
        _ => return None,
    };
    let side = if index % 2 == 1 { Side::Left } else { Side::Right };
    Some((side, joint))
}

/// Landmark pairs connected when drawing a skeleton overlay for one side.
///
/// Exposed as data so a display layer needs no anatomical knowledge; this
/// crate does no rendering itself.
pub const SKELETON_SEGMENTS: [(Joint, Joint); 6] = [
    (Joint::Hip, Joint::Knee),
    (Joint::Knee, Joint::Ankle),
    (Joint::Shoulder, Joint::Hip),
    (Joint::Shoulder, Joint::Elbow),
    (Joint::Elbow, Joint::Wrist),
    (Joint::Ear, Joint::Shoulder),
];

/// Detected landmarks for one subject in one image.
///
/// Immutable once built; each assessment is a pure function of one
/// `LandmarkSet` and one rule set.
#[derive(Debug, Clone, Default)]
pub struct LandmarkSet {
    points: HashMap<(Side, Joint), Point2D>,
}

impl LandmarkSet {
    /// Create an empty landmark set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a detected joint position
    pub fn insert(&mut self, side: Side, joint: Joint, point: Point2D) {
        self.points.insert((side, joint), point);
    }

    /// Look up a joint position; `None` means the detector did not find it
    #[must_use]
    pub fn get(&self, side: Side, joint: Joint) -> Option<Point2D> {
        self.points.get(&(side, joint)).copied()
    }

    /// Number of stored landmarks
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no landmarks were detected at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Build a landmark set from detector output keyed by MediaPipe pose
    /// indices. Indices outside the supported joint vocabulary are ignored.
    #[must_use]
    pub fn from_pose_indices(indexed: &HashMap<u32, (f64, f64)>) -> Self {
        let mut set = Self::new();
        for (&index, &(x, y)) in indexed {
            if let Some((side, joint)) = joint_from_pose_index(index) {
                set.insert(side, joint, Point2D::new(x, y));
            }
        }
        set
    }

    /// Choose which body side to assess.
    ///
    /// For a subject photographed in profile, the visible side is the one
    /// whose landmarks sit closer to the left image edge on average. If only
    /// one side has any landmarks that side wins; with no landmarks at all
    /// the choice defaults to left.
    #[must_use]
    pub fn infer_side(&self) -> Side {
        let mean_x = |side: Side| -> Option<f64> {
            let xs: Vec<f64> = Joint::ALL
                .iter()
                .filter_map(|&joint| self.get(side, joint))
                .map(|p| p.x)
                .collect();
            if xs.is_empty() {
                None
            } else {
                Some(xs.iter().sum::<f64>() / xs.len() as f64)
            }
        };

        match (mean_x(Side::Left), mean_x(Side::Right)) {
            (Some(left), Some(right)) => {
                if left < right {
                    Side::Left
                } else {
                    Side::Right
                }
            }
            (Some(_), None) => {
                log::warn!("No right-side landmarks available; assessing LEFT");
                Side::Left
            }
            (None, Some(_)) => {
                log::warn!("No left-side landmarks available; assessing RIGHT");
                Side::Right
            }
            (None, None) => {
                log::warn!("No side landmarks available; defaulting to LEFT");
                Side::Left
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_index_round_trip() {
        for side in [Side::Left, Side::Right] {
            for joint in Joint::ALL {
                let index = pose_index(side, joint);
                assert_eq!(joint_from_pose_index(index), Some((side, joint)));
            }
        }
    }

    #[test]
    fn test_pose_index_unknown() {
        // Nose, fingers and feet are outside the vocabulary
        assert_eq!(joint_from_pose_index(0), None);
        assert_eq!(joint_from_pose_index(19), None);
        assert_eq!(joint_from_pose_index(31), None);
    }

    #[test]
    fn test_from_pose_indices() {
        let mut indexed = HashMap::new();
        indexed.insert(25, (0.4, 0.6)); // left knee
        indexed.insert(0, (0.5, 0.1)); // nose, ignored
        let set = LandmarkSet::from_pose_indices(&indexed);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(Side::Left, Joint::Knee), Some(Point2D::new(0.4, 0.6)));
        assert_eq!(set.get(Side::Right, Joint::Knee), None);
    }

    #[test]
    fn test_infer_side_prefers_smaller_mean_x() {
        let mut set = LandmarkSet::new();
        set.insert(Side::Left, Joint::Hip, Point2D::new(0.2, 0.5));
        set.insert(Side::Left, Joint::Knee, Point2D::new(0.25, 0.7));
        set.insert(Side::Right, Joint::Hip, Point2D::new(0.6, 0.5));
        set.insert(Side::Right, Joint::Knee, Point2D::new(0.65, 0.7));
        assert_eq!(set.infer_side(), Side::Left);

        let mut mirrored = LandmarkSet::new();
        mirrored.insert(Side::Left, Joint::Hip, Point2D::new(0.8, 0.5));
        mirrored.insert(Side::Right, Joint::Hip, Point2D::new(0.3, 0.5));
        assert_eq!(mirrored.infer_side(), Side::Right);
    }

    #[test]
    fn test_infer_side_fallbacks() {
        let empty = LandmarkSet::new();
        assert_eq!(empty.infer_side(), Side::Left);

        let mut right_only = LandmarkSet::new();
        right_only.insert(Side::Right, Joint::Shoulder, Point2D::new(0.5, 0.3));
        assert_eq!(right_only.infer_side(), Side::Right);
    }
}
