//! Sketch planes and profiles
//!
//! A sketch plane is the oriented 2D frame a profile is drawn on before it
//! is extruded. This module resolves planes from explicit input or picked
//! faces, and builds closed profile loops in the plane's local frame.

pub mod plane;
pub mod profile;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::SelectionError;

pub use plane::{PlaneResolver, PlaneSource};
pub use profile::{CurveSegment, ProfileBuilder, ProfileLoop};

/// Sketch-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("No face was selected")]
    NoSelection,

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Degenerate profile: corner {index} coincides with the next corner")]
    DegenerateProfile { index: usize },
}

impl From<SelectionError> for SketchError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::NoSelection => SketchError::NoSelection,
        }
    }
}

/// Result type for sketch operations
pub type SketchResult<T> = Result<T, SketchError>;

/// An oriented sketch plane
///
/// The normal is kept exactly as supplied; frame axes are derived from its
/// normalized direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal (not necessarily unit length)
    pub normal: DVec3,
    /// Origin of the plane's local frame
    pub origin: DVec3,
}

impl Plane {
    /// Create a plane without validation
    pub fn new(normal: DVec3, origin: DVec3) -> Self {
        Self { normal, origin }
    }

    /// Create a plane, rejecting degenerate or non-finite normals
    pub fn try_new(normal: DVec3, origin: DVec3, tolerance: f64) -> SketchResult<Self> {
        if !normal.is_finite() || !origin.is_finite() {
            return Err(SketchError::UnsupportedGeometry(format!(
                "plane normal {normal} and origin {origin} must be finite"
            )));
        }
        let plane = Self::new(normal, origin);
        if normal.length() <= tolerance || plane.unit_normal() == DVec3::ZERO {
            return Err(SketchError::UnsupportedGeometry(format!(
                "plane normal {normal} is degenerate"
            )));
        }
        Ok(plane)
    }

    /// XY plane at the world origin
    pub fn xy() -> Self {
        Self::new(DVec3::Z, DVec3::ZERO)
    }

    /// Unit-length normal (zero for a degenerate plane)
    ///
    /// Scaled by its largest component first so huge normals do not overflow.
    pub fn unit_normal(&self) -> DVec3 {
        let largest = self.normal.abs().max_element();
        if largest == 0.0 || !largest.is_finite() {
            return DVec3::ZERO;
        }
        (self.normal / largest).normalize_or_zero()
    }

    /// Local X axis of the plane frame
    pub fn x_axis(&self) -> DVec3 {
        let n = self.unit_normal();
        let up = if n.z.abs() < 0.9 { DVec3::Z } else { DVec3::Y };
        up.cross(n).normalize_or_zero()
    }

    /// Local Y axis of the plane frame
    pub fn y_axis(&self) -> DVec3 {
        self.unit_normal().cross(self.x_axis())
    }

    /// Map a point from the local frame to world coordinates
    ///
    /// Local Z runs along the unit normal.
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.origin + self.x_axis() * local.x + self.y_axis() * local.y + self.unit_normal() * local.z
    }

    /// Signed distance of a world point from the plane
    pub fn distance_to(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.unit_normal())
    }
}
