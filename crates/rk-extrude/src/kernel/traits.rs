//! CAD Kernel trait definitions
//!
//! These traits define the interface that geometry kernels must implement.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::selection::GeometryObject;
use crate::sketch::{Plane, ProfileLoop};

/// Error type for CAD kernel operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CadError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for CAD operations
pub type CadResult<T> = Result<T, CadError>;

/// A planar face of a solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidFace {
    /// Outward unit normal
    pub normal: DVec3,
    /// A point lying on the face
    pub origin: DVec3,
}

impl SolidFace {
    /// Create a new face, normalizing the normal
    pub fn new(normal: DVec3, origin: DVec3) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            origin,
        }
    }

    /// The face as a pickable geometry object
    pub fn geometry(&self) -> GeometryObject {
        GeometryObject::PlanarFace {
            normal: self.normal,
            origin: self.origin,
        }
    }
}

/// A 3D solid body produced by a kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Unique identifier
    pub id: Uuid,
    /// Vertex positions in world coordinates
    pub vertices: Vec<DVec3>,
    /// Bounding faces
    pub faces: Vec<SolidFace>,
    /// Enclosed volume
    pub volume: f64,
}

impl Solid {
    /// Create a new solid
    pub fn new(vertices: Vec<DVec3>, faces: Vec<SolidFace>, volume: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices,
            faces,
            volume,
        }
    }

    /// Move every vertex and face by `offset`
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
        for face in &mut self.faces {
            face.origin += offset;
        }
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty solid
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }
}

/// The main CAD kernel trait
///
/// Implementations provide the geometry operations the extrusion command
/// relies on. Every call is fallible: a kernel may refuse a profile it
/// cannot turn into a valid solid.
pub trait CadKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Extrude closed profile loops along the plane normal
    ///
    /// # Arguments
    /// * `loops` - Profile loops in the plane's local frame
    /// * `plane` - The sketch plane the loops lie on
    /// * `depth` - Extrusion distance along the plane's unit normal
    fn extrude(&self, loops: &[ProfileLoop], plane: &Plane, depth: f64) -> CadResult<Solid>;
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl CadKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn extrude(&self, _loops: &[ProfileLoop], _plane: &Plane, _depth: f64) -> CadResult<Solid> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }
}

/// Get the default CAD kernel
pub fn default_kernel() -> Box<dyn CadKernel> {
    #[cfg(feature = "truck")]
    {
        Box::new(super::TruckKernel::new())
    }

    #[cfg(not(feature = "truck"))]
    {
        Box::new(NullKernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_kernel_refuses() {
        let kernel = NullKernel;
        assert!(!kernel.is_available());
        let err = kernel.extrude(&[], &Plane::xy(), 5.0).unwrap_err();
        assert!(matches!(err, CadError::KernelNotAvailable(_)));
    }

    #[test]
    fn test_default_kernel() {
        let kernel = default_kernel();
        if cfg!(feature = "truck") {
            assert_eq!(kernel.name(), "truck");
            assert!(kernel.is_available());
        } else {
            assert_eq!(kernel.name(), "null");
        }
    }

    #[test]
    fn test_translate_solid() {
        let mut solid = Solid::new(
            vec![DVec3::ZERO, DVec3::ONE],
            vec![SolidFace::new(DVec3::new(0.0, 0.0, 3.0), DVec3::ZERO)],
            1.0,
        );
        solid.translate(DVec3::new(-16.0, 0.0, 0.0));

        assert_eq!(
            solid.bounds(),
            Some((DVec3::new(-16.0, 0.0, 0.0), DVec3::new(-15.0, 1.0, 1.0)))
        );
        assert_eq!(solid.faces[0].normal, DVec3::Z);
        assert_eq!(solid.faces[0].origin, DVec3::new(-16.0, 0.0, 0.0));
    }
}
