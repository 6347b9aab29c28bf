//! Extrusion profiles
//!
//! Closed loops of straight segments expressed in the sketch plane's local
//! frame (z = 0), so a loop always lies in the plane it is paired with.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::{Plane, SketchError, SketchResult};
use crate::config::ExtrusionConfig;
use crate::constants::{POINT_TOLERANCE, PROFILE_HEIGHT, PROFILE_WIDTH};

/// A bounded straight edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    /// Start point
    pub start: DVec3,
    /// End point
    pub end: DVec3,
}

impl CurveSegment {
    /// Create a bounded segment
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Length of the segment
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// One closed boundary of an extrusion cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLoop {
    segments: Vec<CurveSegment>,
}

impl ProfileLoop {
    /// Chain corners head-to-tail and close the loop back to the first corner
    ///
    /// Fails with [`SketchError::DegenerateProfile`] when fewer than three
    /// corners are given or two consecutive corners (including the last and
    /// the first) are closer than `tolerance`.
    pub fn from_corners(corners: &[DVec3], tolerance: f64) -> SketchResult<Self> {
        if corners.len() < 3 {
            return Err(SketchError::DegenerateProfile {
                index: corners.len().saturating_sub(1),
            });
        }

        let n = corners.len();
        let segments = (0..n)
            .map(|i| {
                let start = corners[i];
                let end = corners[(i + 1) % n];
                if start.distance(end) <= tolerance {
                    Err(SketchError::DegenerateProfile { index: i })
                } else {
                    Ok(CurveSegment::new(start, end))
                }
            })
            .collect::<SketchResult<Vec<_>>>()?;

        Ok(Self { segments })
    }

    /// Segments in order
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Start point of each segment
    pub fn corners(&self) -> Vec<DVec3> {
        self.segments.iter().map(|s| s.start).collect()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the loop has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the segments chain head-to-tail and the last ends at the first start
    pub fn is_closed(&self) -> bool {
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return false;
        };
        let chained = self.segments.windows(2).all(|w| w[0].end == w[1].start);
        chained && last.end == first.start
    }

    /// Signed area in the local XY plane (positive = counter-clockwise)
    pub fn signed_area(&self) -> f64 {
        0.5 * self
            .segments
            .iter()
            .map(|s| s.start.x * s.end.y - s.end.x * s.start.y)
            .sum::<f64>()
    }

    /// Total length of all segments
    pub fn perimeter(&self) -> f64 {
        self.segments.iter().map(CurveSegment::length).sum()
    }

    /// Corners mapped into world coordinates on `plane`
    pub fn to_world(&self, plane: &Plane) -> Vec<DVec3> {
        self.segments.iter().map(|s| plane.to_world(s.start)).collect()
    }
}

/// Builds the rectangular extrusion profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileBuilder {
    /// Rectangle width (local X)
    pub width: f64,
    /// Rectangle height (local Y)
    pub height: f64,
    /// Local position of the first corner
    pub anchor: DVec2,
    /// Distance under which corners coincide
    pub tolerance: f64,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::rectangle(PROFILE_WIDTH, PROFILE_HEIGHT)
    }
}

impl ProfileBuilder {
    /// Rectangle anchored at the local origin
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            anchor: DVec2::ZERO,
            tolerance: POINT_TOLERANCE,
        }
    }

    /// Builder using the profile settings of a configuration
    pub fn from_config(config: &ExtrusionConfig) -> Self {
        Self {
            width: config.profile_width,
            height: config.profile_height,
            anchor: config.anchor(),
            tolerance: config.point_tolerance,
        }
    }

    /// Move the first corner
    pub fn with_anchor(mut self, anchor: DVec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// The four corners, counter-clockwise from the anchor
    pub fn corners(&self) -> [DVec3; 4] {
        let DVec2 { x, y } = self.anchor;
        [
            DVec3::new(x, y, 0.0),
            DVec3::new(x + self.width, y, 0.0),
            DVec3::new(x + self.width, y + self.height, 0.0),
            DVec3::new(x, y + self.height, 0.0),
        ]
    }

    /// Build the closed loop
    pub fn build(&self) -> SketchResult<ProfileLoop> {
        let profile = ProfileLoop::from_corners(&self.corners(), self.tolerance)?;
        tracing::debug!(
            "Built {}x{} profile with {} segments",
            self.width,
            self.height,
            profile.len()
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_rectangle_corners() {
        let profile = ProfileBuilder::default().build().unwrap();
        assert_eq!(
            profile.corners(),
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(5.0, 0.0, 0.0),
                DVec3::new(5.0, 5.0, 0.0),
                DVec3::new(0.0, 5.0, 0.0),
            ]
        );
        assert_eq!(profile.len(), 4);
    }

    #[test]
    fn test_profile_closure() {
        let profile = ProfileBuilder::default().build().unwrap();
        let segments = profile.segments();
        assert_eq!(segments[3].end, segments[0].start);
        assert!(profile.is_closed());
    }

    #[test]
    fn test_anchored_profile_closure() {
        let profile = ProfileBuilder::rectangle(0.1, 0.3)
            .with_anchor(DVec2::new(-7.3, 1.1))
            .build()
            .unwrap();
        let segments = profile.segments();
        assert_eq!(segments[3].end, segments[0].start);
        assert!(profile.is_closed());
    }

    #[test]
    fn test_area_and_perimeter() {
        let profile = ProfileBuilder::rectangle(5.0, 3.0).build().unwrap();
        assert_relative_eq!(profile.signed_area(), 15.0);
        assert_relative_eq!(profile.perimeter(), 16.0);
    }

    #[test]
    fn test_zero_width_is_degenerate() {
        let err = ProfileBuilder::rectangle(0.0, 5.0).build().unwrap_err();
        assert_eq!(err, SketchError::DegenerateProfile { index: 0 });
    }

    #[test]
    fn test_zero_height_is_degenerate() {
        let err = ProfileBuilder::rectangle(5.0, 0.0).build().unwrap_err();
        assert_eq!(err, SketchError::DegenerateProfile { index: 1 });
    }

    #[test]
    fn test_too_few_corners() {
        let err = ProfileLoop::from_corners(&[DVec3::ZERO, DVec3::X], 1e-9).unwrap_err();
        assert!(matches!(err, SketchError::DegenerateProfile { .. }));
    }

    #[test]
    fn test_to_world_lies_on_plane() {
        let plane = Plane::new(DVec3::new(1.0, 1.0, 0.0), DVec3::new(0.0, 0.0, 2.0));
        let profile = ProfileBuilder::default().build().unwrap();
        for corner in profile.to_world(&plane) {
            assert_relative_eq!(plane.distance_to(corner), 0.0, epsilon = 1e-12);
        }
    }
}
