//! Truck CAD Kernel Backend
//!
//! Pure Rust B-Rep kernel using the Truck library. The profile is turned into
//! a planar face and swept along the plane normal; the faces of the swept
//! shell are read back into a [`Solid`] ordered bottom cap, top cap, then one
//! side per profile segment.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use glam::DVec3;
use uuid::Uuid;

use truck_modeling::geometry::Surface;
use truck_modeling::{Face, Point3, Solid as TruckSolid, Vector3, Vertex, Wire, builder};

use super::validate::{self, Prepared};
use super::{CadError, CadKernel, CadResult, Solid, SolidFace};
use crate::constants::POINT_TOLERANCE;
use crate::sketch::{Plane, ProfileLoop};

/// Kernel output is matched against the requested corners within this distance
const MATCH_TOLERANCE: f64 = 1e-7;

/// Truck-based CAD kernel
pub struct TruckKernel {
    tolerance: f64,
    /// Storage for the B-Rep of every solid built (keyed by solid id)
    solids: Mutex<HashMap<Uuid, TruckSolid>>,
}

/// A planar face read back from a truck shell
struct ShellFace {
    normal: DVec3,
    corners: Vec<DVec3>,
}

impl ShellFace {
    fn read(face: &Face) -> CadResult<Self> {
        let Surface::Plane(surface) = face.oriented_surface() else {
            return Err(CadError::OperationFailed(
                "extrusion produced a non-planar face".into(),
            ));
        };
        let corners = face
            .boundaries()
            .iter()
            .flat_map(|wire| wire.vertex_iter())
            .map(|v| to_dvec3(v.point()))
            .collect();
        let n = surface.normal();
        Ok(Self {
            normal: DVec3::new(n.x, n.y, n.z),
            corners,
        })
    }

    fn touches(&self, p: DVec3) -> bool {
        self.corners.iter().any(|c| c.distance(p) <= MATCH_TOLERANCE)
    }

    fn is_cap(&self, axis: DVec3) -> bool {
        self.normal.dot(axis).abs() >= 1.0 - MATCH_TOLERANCE
    }
}

impl TruckKernel {
    /// Create a new Truck kernel
    pub fn new() -> Self {
        Self::with_tolerance(POINT_TOLERANCE)
    }

    /// Create a kernel with a custom geometric tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            solids: Mutex::new(HashMap::new()),
        }
    }

    /// The B-Rep a solid was built from, in its construction position
    pub fn brep(&self, id: Uuid) -> Option<TruckSolid> {
        self.solids.lock().ok()?.get(&id).cloned()
    }

    fn store_solid(&self, id: Uuid, brep: TruckSolid) -> CadResult<()> {
        let mut solids = self
            .solids
            .lock()
            .map_err(|_| CadError::OperationFailed("solid storage is poisoned".into()))?;
        solids.insert(id, brep);
        Ok(())
    }

    /// Create a closed wire through world points
    fn create_wire(&self, points: &[DVec3]) -> Wire {
        let vertices: Vec<Vertex> = points.iter().map(|p| builder::vertex(to_point(*p))).collect();

        let n = vertices.len();
        let edges: Vec<_> = (0..n)
            .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
            .collect();

        edges.into()
    }

    /// Read the swept shell back as outward faces in profile order
    fn read_faces(
        &self,
        brep: &TruckSolid,
        bottom: &[DVec3],
        top: &[DVec3],
        normal: DVec3,
    ) -> CadResult<Vec<SolidFace>> {
        let shell_faces = brep
            .boundaries()
            .iter()
            .flat_map(|shell| shell.face_iter())
            .map(ShellFace::read)
            .collect::<CadResult<Vec<_>>>()?;

        if shell_faces.len() != bottom.len() + 2 {
            return Err(CadError::OperationFailed(format!(
                "expected {} faces from the sweep, got {}",
                bottom.len() + 2,
                shell_faces.len()
            )));
        }

        let bottom_face = find_face(&shell_faces, "bottom", |f| {
            f.is_cap(normal) && f.touches(bottom[0])
        })?;
        let top_face = find_face(&shell_faces, "top", |f| f.is_cap(normal) && f.touches(top[0]))?;

        // An inside-out sweep has its bottom cap facing along the normal
        let sign = if bottom_face.normal.dot(normal) > 0.0 {
            tracing::debug!("Sweep came out inverted, flipping face normals");
            -1.0
        } else {
            1.0
        };

        let mut faces = Vec::with_capacity(shell_faces.len());
        faces.push(SolidFace::new(bottom_face.normal * sign, bottom[0]));
        faces.push(SolidFace::new(top_face.normal * sign, top[0]));
        for (i, start) in bottom.iter().enumerate() {
            let end = bottom[(i + 1) % bottom.len()];
            let side = find_face(&shell_faces, "side", |f| {
                !f.is_cap(normal) && f.touches(*start) && f.touches(end)
            })?;
            faces.push(SolidFace::new(side.normal * sign, *start));
        }
        Ok(faces)
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl CadKernel for TruckKernel {
    fn name(&self) -> &str {
        "truck"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn extrude(&self, loops: &[ProfileLoop], plane: &Plane, depth: f64) -> CadResult<Solid> {
        let Prepared {
            profile,
            normal,
            area,
        } = validate::prepare(loops, plane, depth, self.tolerance)?;

        let bottom = profile.to_world(plane);
        let top: Vec<DVec3> = bottom.iter().map(|p| *p + normal * depth).collect();

        // Wind the wire counter-clockwise about the normal so the face points along it
        let mut outline = bottom.clone();
        if area < 0.0 {
            outline.reverse();
        }
        let wire = self.create_wire(&outline);

        let face = builder::try_attach_plane(&[wire])
            .map_err(|e| CadError::OperationFailed(format!("Failed to create face: {:?}", e)))?;
        let brep = builder::tsweep(&face, to_vector(normal * depth));

        let faces = self.read_faces(&brep, &bottom, &top, normal)?;

        let mut seen = HashSet::new();
        let vertices: Vec<DVec3> = brep
            .boundaries()
            .iter()
            .flat_map(|shell| shell.vertex_iter())
            .filter(|v| seen.insert(v.id()))
            .map(|v| to_dvec3(v.point()))
            .collect();

        let volume = area.abs() * depth;
        tracing::debug!(
            "Extruded {}-sided profile by {} (volume {})",
            profile.len(),
            depth,
            volume
        );

        let solid = Solid::new(vertices, faces, volume);
        self.store_solid(solid.id, brep)?;
        Ok(solid)
    }
}

fn find_face<'a>(
    faces: &'a [ShellFace],
    what: &str,
    matches: impl Fn(&ShellFace) -> bool,
) -> CadResult<&'a ShellFace> {
    faces
        .iter()
        .find(|f| matches(f))
        .ok_or_else(|| CadError::OperationFailed(format!("sweep result has no {what} face")))
}

fn to_point(p: DVec3) -> Point3 {
    Point3::new(p.x, p.y, p.z)
}

fn to_vector(v: DVec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

fn to_dvec3(p: Point3) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::ProfileBuilder;
    use approx::assert_relative_eq;

    fn square() -> ProfileLoop {
        ProfileBuilder::default().build().unwrap()
    }

    fn assert_vec_eq(actual: DVec3, expected: DVec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-9),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_extrude_on_xy() {
        let kernel = TruckKernel::new();
        let solid = kernel.extrude(&[square()], &Plane::xy(), 5.0).unwrap();

        assert_eq!(solid.vertices.len(), 8);
        assert_eq!(solid.faces.len(), 6);
        assert_relative_eq!(solid.volume, 125.0);
        let (min, max) = solid.bounds().unwrap();
        assert_vec_eq(min, DVec3::ZERO);
        assert_vec_eq(max, DVec3::new(5.0, 5.0, 5.0));

        // Caps
        assert_vec_eq(solid.faces[0].normal, -DVec3::Z);
        assert_vec_eq(solid.faces[1].normal, DVec3::Z);
        assert_eq!(solid.faces[1].origin, DVec3::new(0.0, 0.0, 5.0));
        // First side face sits on y = 0 and faces -Y
        assert_vec_eq(solid.faces[2].normal, -DVec3::Y);
    }

    #[test]
    fn test_brep_is_kept() {
        let kernel = TruckKernel::new();
        let solid = kernel.extrude(&[square()], &Plane::xy(), 5.0).unwrap();

        let brep = kernel.brep(solid.id).unwrap();
        let faces: usize = brep.boundaries().iter().map(|s| s.face_iter().count()).sum();
        assert_eq!(faces, 6);
        assert!(kernel.brep(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_extrude_along_tilted_normal() {
        let kernel = TruckKernel::new();
        let plane = Plane::new(DVec3::new(1.0, 1.0, 0.0), DVec3::ZERO);
        let solid = kernel.extrude(&[square()], &plane, 5.0).unwrap();

        assert_relative_eq!(solid.volume, 125.0);
        let unit = DVec3::new(1.0, 1.0, 0.0).normalize();
        let above = solid
            .vertices
            .iter()
            .filter(|v| (plane.distance_to(**v) - 5.0).abs() < 1e-9)
            .count();
        assert_eq!(above, 4);
        assert_relative_eq!(solid.faces[1].normal.dot(unit), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_faces_point_outward() {
        let kernel = TruckKernel::new();
        let solid = kernel.extrude(&[square()], &Plane::xy(), 2.0).unwrap();
        let center = DVec3::new(2.5, 2.5, 1.0);
        for face in &solid.faces {
            assert!(face.normal.dot(face.origin - center) > 0.0);
        }
    }

    #[test]
    fn test_clockwise_profile_still_points_outward() {
        let corners = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 4.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ];
        let profile = ProfileLoop::from_corners(&corners, 1e-9).unwrap();
        let solid = TruckKernel::new()
            .extrude(&[profile], &Plane::xy(), 1.0)
            .unwrap();

        assert_relative_eq!(solid.volume, 16.0);
        assert_vec_eq(solid.faces[1].normal, DVec3::Z);
        let center = DVec3::new(2.0, 2.0, 0.5);
        for face in &solid.faces {
            assert!(face.normal.dot(face.origin - center) > 0.0);
        }
    }

    #[test]
    fn test_invalid_profile_never_reaches_truck() {
        let kernel = TruckKernel::new();
        // Bow-tie
        let corners = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(5.0, 5.0, 0.0),
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(0.0, 5.0, 0.0),
        ];
        let profile = ProfileLoop::from_corners(&corners, 1e-9).unwrap();
        let err = kernel.extrude(&[profile], &Plane::xy(), 5.0).unwrap_err();
        assert!(matches!(err, CadError::InvalidProfile(_)));

        let err = kernel.extrude(&[square()], &Plane::xy(), 0.0).unwrap_err();
        assert!(matches!(err, CadError::OperationFailed(_)));
        assert!(kernel.solids.lock().unwrap().is_empty());
    }
}
