//! Sketch plane resolution
//!
//! Turns explicit normal/origin input or a picked face into a [`Plane`].

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{Plane, SketchError, SketchResult};
use crate::constants::NORMAL_TOLERANCE;
use crate::selection::{FacePicker, GeometryObject, GeometrySource};

/// Where the sketch plane comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlaneSource {
    /// Normal and origin supplied directly
    Explicit {
        /// Plane normal
        normal: DVec3,
        /// Plane origin
        origin: DVec3,
    },
    /// A face designated interactively
    PickedFace,
}

impl PlaneSource {
    /// Explicit plane source
    pub fn explicit(normal: DVec3, origin: DVec3) -> Self {
        PlaneSource::Explicit { normal, origin }
    }
}

/// Resolves a [`PlaneSource`] into a [`Plane`]
#[derive(Debug, Clone, Copy)]
pub struct PlaneResolver {
    normal_tolerance: f64,
}

impl Default for PlaneResolver {
    fn default() -> Self {
        Self::new(NORMAL_TOLERANCE)
    }
}

impl PlaneResolver {
    /// Create a resolver rejecting normals at or below `normal_tolerance`
    pub fn new(normal_tolerance: f64) -> Self {
        Self { normal_tolerance }
    }

    /// Resolve a plane
    ///
    /// The picker is only consulted for [`PlaneSource::PickedFace`]; a
    /// cancelled pick surfaces as [`SketchError::NoSelection`].
    pub fn resolve<G>(
        &self,
        source: &PlaneSource,
        geometry: &G,
        picker: &mut dyn FacePicker,
    ) -> SketchResult<Plane>
    where
        G: GeometrySource + ?Sized,
    {
        match *source {
            PlaneSource::Explicit { normal, origin } => {
                Plane::try_new(normal, origin, self.normal_tolerance)
            }
            PlaneSource::PickedFace => self.resolve_picked(geometry, picker),
        }
    }

    fn resolve_picked<G>(&self, geometry: &G, picker: &mut dyn FacePicker) -> SketchResult<Plane>
    where
        G: GeometrySource + ?Sized,
    {
        let reference = picker.designate_face()?;
        tracing::debug!("Designated face {}", reference);

        let object = geometry.geometry_object(&reference).ok_or_else(|| {
            SketchError::UnsupportedGeometry(format!(
                "reference {reference} does not resolve to any geometry"
            ))
        })?;

        match object {
            GeometryObject::PlanarFace { normal, origin } => {
                Plane::try_new(normal, origin, self.normal_tolerance)
            }
            other => Err(SketchError::UnsupportedGeometry(format!(
                "expected a planar face, but {reference} is a {}",
                other.surface_name()
            ))),
        }
    }
}
