//! Input checks shared by kernel backends
//!
//! B-Rep builders accept a self-intersecting or off-plane wire and return a
//! broken solid, so profiles are checked before they reach the kernel.

use glam::{DVec2, DVec3};

use super::{CadError, CadResult};
use crate::sketch::{Plane, ProfileLoop};

/// An extrusion request that passed validation
#[derive(Debug, Clone, Copy)]
pub(crate) struct Prepared<'a> {
    /// The single profile loop
    pub profile: &'a ProfileLoop,
    /// Unit normal of the sketch plane
    pub normal: DVec3,
    /// Signed area of the profile in the plane's local frame
    pub area: f64,
}

/// Validate the arguments of [`CadKernel::extrude`](super::CadKernel::extrude)
pub(crate) fn prepare<'a>(
    loops: &'a [ProfileLoop],
    plane: &Plane,
    depth: f64,
    tolerance: f64,
) -> CadResult<Prepared<'a>> {
    let profile = match loops {
        [] => return Err(CadError::InvalidProfile("no profile loops given".into())),
        [profile] => profile,
        _ => {
            return Err(CadError::InvalidProfile(format!(
                "expected a single profile loop, got {}",
                loops.len()
            )));
        }
    };

    if !depth.is_finite() || depth <= tolerance {
        return Err(CadError::OperationFailed(format!(
            "extrusion depth must be positive, got {depth}"
        )));
    }

    let normal = plane.unit_normal();
    if normal == DVec3::ZERO || !plane.origin.is_finite() {
        return Err(CadError::OperationFailed(
            "sketch plane has no usable normal".into(),
        ));
    }

    let area = check_profile(profile, tolerance)?;
    Ok(Prepared {
        profile,
        normal,
        area,
    })
}

/// Validate a profile loop and return its signed area
fn check_profile(profile: &ProfileLoop, tolerance: f64) -> CadResult<f64> {
    if profile.len() < 3 {
        return Err(CadError::InvalidProfile(format!(
            "profile needs at least 3 segments, got {}",
            profile.len()
        )));
    }
    if !profile.is_closed() {
        return Err(CadError::InvalidProfile("profile loop is not closed".into()));
    }
    if profile
        .segments()
        .iter()
        .any(|s| s.start.z.abs() > tolerance || !s.start.is_finite())
    {
        return Err(CadError::InvalidProfile(
            "profile does not lie in the sketch plane".into(),
        ));
    }
    if is_self_intersecting(profile, tolerance) {
        return Err(CadError::InvalidProfile(
            "profile loop intersects itself".into(),
        ));
    }

    let area = profile.signed_area();
    if area.abs() <= tolerance {
        return Err(CadError::InvalidProfile("profile encloses no area".into()));
    }
    Ok(area)
}

/// Check non-adjacent segments for crossings in the local XY plane
fn is_self_intersecting(profile: &ProfileLoop, tolerance: f64) -> bool {
    let segments: Vec<(DVec2, DVec2)> = profile
        .segments()
        .iter()
        .map(|s| (s.start.truncate(), s.end.truncate()))
        .collect();
    let n = segments.len();

    for i in 0..n {
        for j in (i + 2)..n {
            // The first and last segments share a corner
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a0, a1) = segments[i];
            let (b0, b1) = segments[j];
            if segments_intersect(a0, a1, b0, b1, tolerance) {
                return true;
            }
        }
    }
    false
}

fn segments_intersect(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2, tol: f64) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > tol && d2 < -tol) || (d1 < -tol && d2 > tol))
        && ((d3 > tol && d4 < -tol) || (d3 < -tol && d4 > tol))
    {
        return true;
    }

    // Collinear touching
    (d1.abs() <= tol && on_segment(b0, b1, a0))
        || (d2.abs() <= tol && on_segment(b0, b1, a1))
        || (d3.abs() <= tol && on_segment(a0, a1, b0))
        || (d4.abs() <= tol && on_segment(a0, a1, b1))
}

fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::ProfileBuilder;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    fn square() -> ProfileLoop {
        ProfileBuilder::default().build().unwrap()
    }

    fn from_corners(corners: &[DVec3]) -> ProfileLoop {
        ProfileLoop::from_corners(corners, TOL).unwrap()
    }

    #[test]
    fn test_prepare_square() {
        let loops = [square()];
        let plane = Plane::new(DVec3::new(0.0, 0.0, 3.0), DVec3::ZERO);
        let prepared = prepare(&loops, &plane, 5.0, TOL).unwrap();

        assert_eq!(prepared.normal, DVec3::Z);
        assert_relative_eq!(prepared.area, 25.0);
        assert_eq!(prepared.profile.len(), 4);
    }

    #[test]
    fn test_clockwise_area_is_negative() {
        let loops = [from_corners(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 4.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ])];
        let prepared = prepare(&loops, &Plane::xy(), 1.0, TOL).unwrap();
        assert_relative_eq!(prepared.area, -16.0);
    }

    #[test]
    fn test_self_intersecting_profile_fails() {
        // Bow-tie
        let loops = [from_corners(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(5.0, 5.0, 0.0),
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(0.0, 5.0, 0.0),
        ])];
        let err = prepare(&loops, &Plane::xy(), 5.0, TOL).unwrap_err();
        assert!(matches!(err, CadError::InvalidProfile(_)));
    }

    #[test]
    fn test_collinear_profile_fails() {
        let loops = [from_corners(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
        ])];
        let err = prepare(&loops, &Plane::xy(), 5.0, TOL).unwrap_err();
        assert!(matches!(err, CadError::InvalidProfile(_)));
    }

    #[test]
    fn test_profile_off_plane_fails() {
        let loops = [from_corners(&[
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
        ])];
        let err = prepare(&loops, &Plane::xy(), 5.0, TOL).unwrap_err();
        assert!(matches!(err, CadError::InvalidProfile(_)));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let xy = Plane::xy();
        assert!(matches!(
            prepare(&[], &xy, 5.0, TOL),
            Err(CadError::InvalidProfile(_))
        ));
        assert!(matches!(
            prepare(&[square(), square()], &xy, 5.0, TOL),
            Err(CadError::InvalidProfile(_))
        ));
        assert!(matches!(
            prepare(&[square()], &xy, 0.0, TOL),
            Err(CadError::OperationFailed(_))
        ));
        assert!(matches!(
            prepare(&[square()], &xy, f64::INFINITY, TOL),
            Err(CadError::OperationFailed(_))
        ));
        assert!(matches!(
            prepare(&[square()], &Plane::new(DVec3::ZERO, DVec3::ZERO), 5.0, TOL),
            Err(CadError::OperationFailed(_))
        ));
    }
}
