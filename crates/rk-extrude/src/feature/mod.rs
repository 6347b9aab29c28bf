//! Solid Features
//!
//! A solid feature is the body produced by extruding a profile on a sketch
//! plane. It records the inputs it was built from, the kernel solid, and the
//! placement offset applied after creation.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kernel::{CadKernel, CadResult, Solid};
use crate::selection::GeometryObject;
use crate::sketch::{Plane, ProfileLoop};

/// An extruded solid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidFeature {
    /// Unique identifier
    pub id: Uuid,
    /// Name of the feature
    pub name: String,
    /// Sketch plane the profile lies on
    pub plane: Plane,
    /// Cross-section in the plane's local frame
    pub profile: ProfileLoop,
    /// Extrusion distance along the plane's unit normal
    pub depth: f64,
    /// The solid geometry, in placed world coordinates
    pub solid: Solid,
    /// Total translation applied since creation
    pub placement: DVec3,
}

impl SolidFeature {
    /// Extrude `profile` on `plane` with the given kernel
    pub fn extrude(
        name: impl Into<String>,
        kernel: &dyn CadKernel,
        plane: Plane,
        profile: ProfileLoop,
        depth: f64,
    ) -> CadResult<Self> {
        let solid = kernel.extrude(std::slice::from_ref(&profile), &plane, depth)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plane,
            profile,
            depth,
            solid,
            placement: DVec3::ZERO,
        })
    }

    /// Get the type name of this feature
    pub fn type_name(&self) -> &'static str {
        "Extrusion"
    }

    /// Move the solid and record the offset
    pub fn translate(&mut self, offset: DVec3) {
        self.solid.translate(offset);
        self.placement += offset;
    }

    /// Number of faces on the solid
    pub fn face_count(&self) -> usize {
        self.solid.faces.len()
    }

    /// Geometry of one face of the solid
    pub fn face(&self, index: usize) -> Option<GeometryObject> {
        self.solid.faces.get(index).map(|f| f.geometry())
    }
}
