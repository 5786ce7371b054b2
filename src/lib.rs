//! Rule-based ergonomic posture assessment from body landmarks.
//!
//! Given pixel (or normalized) coordinates of body joints for one subject
//! in one photograph, this library:
//! 1. Computes a small set of joint angles (knee, hip, elbow, neck) as
//!    unsigned interior angles between landmark rays
//! 2. Checks each angle against a configurable tolerance band
//! 3. Aggregates the per-angle verdicts into one ordinal rating:
//!    ergonomic, mostly ergonomic, or non-ergonomic
//!
//! The landmark detector, image handling and any user interface are
//! external collaborators: the library consumes coordinates the caller
//! already holds and hands verdicts back for the caller to render. Both
//! stages are pure functions with no shared state, so assessments of
//! different images may run concurrently without coordination.
//!
//! Landmarks the detector failed to locate are a routine input, not an
//! error: the affected angles come back indeterminate, are reported as
//! "could not assess", and conservatively downgrade the overall rating.
//!
//! # Examples
//!
//! ```
//! use posture_assessment::{
//!     angle::measure_posture_angles,
//!     classifier::{classify, OverallRating, RuleSet},
//!     landmarks::{Joint, LandmarkSet, Point2D, Side},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Landmarks from an external pose detector (normalized coordinates)
//! let mut landmarks = LandmarkSet::new();
//! landmarks.insert(Side::Left, Joint::Ear, Point2D::new(0.50, 0.10));
//! landmarks.insert(Side::Left, Joint::Shoulder, Point2D::new(0.50, 0.30));
//! landmarks.insert(Side::Left, Joint::Elbow, Point2D::new(0.52, 0.45));
//! landmarks.insert(Side::Left, Joint::Wrist, Point2D::new(0.65, 0.48));
//! landmarks.insert(Side::Left, Joint::Hip, Point2D::new(0.48, 0.60));
//! landmarks.insert(Side::Left, Joint::Knee, Point2D::new(0.65, 0.62));
//! landmarks.insert(Side::Left, Joint::Ankle, Point2D::new(0.64, 0.85));
//!
//! let side = landmarks.infer_side();
//! let angles = measure_posture_angles(&landmarks, side);
//!
//! let rules = RuleSet::default();
//! let verdicts = classify(&angles, &rules)?;
//!
//! for line in verdicts.report(&rules) {
//!     println!("{line}");
//! }
//! assert!(verdicts.overall() <= OverallRating::NonErgonomic);
//! # Ok(())
//! # }
//! ```

/// Landmark vocabulary, per-image landmark storage and side selection
pub mod landmarks;

/// Joint angle computation from landmark points
pub mod angle;

/// Threshold-based posture classification
pub mod classifier;

/// Configuration management
pub mod config;

/// Error types and result handling
pub mod error;

pub use error::{Error, Result};
