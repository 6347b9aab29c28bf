//! Face selection
//!
//! References to faces of document elements, the geometry they resolve to,
//! and the capability used to let a user designate one.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::ElementId;

/// Reference to a face of an element in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceRef {
    /// Element owning the face
    pub element: ElementId,
    /// Index of the face within the element's geometry
    pub index: u32,
}

impl FaceRef {
    /// Create a new face reference
    pub fn new(element: ElementId, index: u32) -> Self {
        Self { element, index }
    }
}

impl std::fmt::Display for FaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.element, self.index)
    }
}

/// Geometric entity behind a face reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryObject {
    /// A flat face
    PlanarFace {
        /// Face normal (outward)
        normal: DVec3,
        /// A point lying on the face
        origin: DVec3,
    },
    /// A curved face around an axis
    CylindricalFace {
        /// A point on the axis
        axis_origin: DVec3,
        /// Axis direction
        axis: DVec3,
        /// Cylinder radius
        radius: f64,
    },
}

impl GeometryObject {
    /// Human readable name of the surface type
    pub fn surface_name(&self) -> &'static str {
        match self {
            GeometryObject::PlanarFace { .. } => "planar face",
            GeometryObject::CylindricalFace { .. } => "cylindrical face",
        }
    }

    /// Whether the object is flat
    pub fn is_planar(&self) -> bool {
        matches!(self, GeometryObject::PlanarFace { .. })
    }

    /// Move the object by an offset
    pub fn translated(self, offset: DVec3) -> Self {
        match self {
            GeometryObject::PlanarFace { normal, origin } => GeometryObject::PlanarFace {
                normal,
                origin: origin + offset,
            },
            GeometryObject::CylindricalFace {
                axis_origin,
                axis,
                radius,
            } => GeometryObject::CylindricalFace {
                axis_origin: axis_origin + offset,
                axis,
                radius,
            },
        }
    }
}

/// Read access to the faces a document exposes for picking
pub trait GeometrySource {
    /// Resolve a face reference to its geometric entity
    fn geometry_object(&self, reference: &FaceRef) -> Option<GeometryObject>;

    /// All face references that can currently be picked
    fn face_references(&self) -> Vec<FaceRef>;
}

/// Selection errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No face was selected")]
    NoSelection,
}

/// Lets a user designate a face
///
/// Implemented by the host's interaction layer. The call blocks until the
/// user picks a face or cancels.
pub trait FacePicker {
    /// Designate a face, or fail with [`SelectionError::NoSelection`] on cancel
    fn designate_face(&mut self) -> Result<FaceRef, SelectionError>;
}

/// A picker with a predetermined answer
///
/// Used for non-interactive invocations: `None` behaves like a cancelled pick.
#[derive(Debug, Clone, Default)]
pub struct PresetPicker {
    face: Option<FaceRef>,
    picks: usize,
}

impl PresetPicker {
    /// Picker that always designates `face`
    pub fn new(face: FaceRef) -> Self {
        Self {
            face: Some(face),
            picks: 0,
        }
    }

    /// Picker that always cancels
    pub fn cancelled() -> Self {
        Self::default()
    }

    /// Number of times a pick was requested
    pub fn picks(&self) -> usize {
        self.picks
    }
}

impl FacePicker for PresetPicker {
    fn designate_face(&mut self) -> Result<FaceRef, SelectionError> {
        self.picks += 1;
        self.face.ok_or(SelectionError::NoSelection)
    }
}
