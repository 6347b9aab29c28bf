//! Document elements

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::ElementId;
use crate::feature::SolidFeature;
use crate::selection::GeometryObject;

/// Geometry carried by an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementBody {
    /// A solid created by the extrusion command
    Extrusion(SolidFeature),
    /// Fixed reference geometry (faces only)
    Reference(Vec<GeometryObject>),
}

/// An element in a model document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier
    pub id: ElementId,
    /// Name of the element
    pub name: String,
    /// Element geometry
    pub body: ElementBody,
}

impl Element {
    /// Element wrapping an extruded feature
    pub fn extrusion(feature: SolidFeature) -> Self {
        Self {
            id: ElementId::new(),
            name: feature.name.clone(),
            body: ElementBody::Extrusion(feature),
        }
    }

    /// Reference element with the given faces
    pub fn reference(name: impl Into<String>, faces: Vec<GeometryObject>) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            body: ElementBody::Reference(faces),
        }
    }

    /// Axis-aligned reference box spanning `min` to `min + size`
    ///
    /// Faces: -X, +X, -Y, +Y, -Z, +Z.
    pub fn reference_box(name: impl Into<String>, min: DVec3, size: DVec3) -> Self {
        let max = min + size;
        let planar = |normal: DVec3, origin: DVec3| GeometryObject::PlanarFace { normal, origin };
        Self::reference(
            name,
            vec![
                planar(-DVec3::X, min),
                planar(DVec3::X, max),
                planar(-DVec3::Y, min),
                planar(DVec3::Y, max),
                planar(-DVec3::Z, min),
                planar(DVec3::Z, max),
            ],
        )
    }

    /// Vertical reference cylinder standing on `base`
    ///
    /// Faces: curved side, bottom cap, top cap.
    pub fn reference_cylinder(
        name: impl Into<String>,
        base: DVec3,
        radius: f64,
        height: f64,
    ) -> Self {
        Self::reference(
            name,
            vec![
                GeometryObject::CylindricalFace {
                    axis_origin: base,
                    axis: DVec3::Z,
                    radius,
                },
                GeometryObject::PlanarFace {
                    normal: -DVec3::Z,
                    origin: base,
                },
                GeometryObject::PlanarFace {
                    normal: DVec3::Z,
                    origin: base + DVec3::Z * height,
                },
            ],
        )
    }

    /// The extruded feature, if this is an extrusion element
    pub fn as_extrusion(&self) -> Option<&SolidFeature> {
        match &self.body {
            ElementBody::Extrusion(feature) => Some(feature),
            ElementBody::Reference(_) => None,
        }
    }

    /// Number of pickable faces
    pub fn face_count(&self) -> usize {
        match &self.body {
            ElementBody::Extrusion(feature) => feature.face_count(),
            ElementBody::Reference(faces) => faces.len(),
        }
    }

    /// Geometry of one face
    pub fn face(&self, index: usize) -> Option<GeometryObject> {
        match &self.body {
            ElementBody::Extrusion(feature) => feature.face(index),
            ElementBody::Reference(faces) => faces.get(index).copied(),
        }
    }

    /// Move the element
    pub fn translate(&mut self, offset: DVec3) {
        match &mut self.body {
            ElementBody::Extrusion(feature) => feature.translate(offset),
            ElementBody::Reference(faces) => {
                for face in faces.iter_mut() {
                    *face = face.translated(offset);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_box_faces() {
        let element = Element::reference_box("Box", DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(element.face_count(), 6);
        assert_eq!(
            element.face(5),
            Some(GeometryObject::PlanarFace {
                normal: DVec3::Z,
                origin: DVec3::new(1.0, 2.0, 3.0),
            })
        );
        assert!(element.as_extrusion().is_none());
    }

    #[test]
    fn test_reference_cylinder_faces() {
        let element = Element::reference_cylinder("Cyl", DVec3::ZERO, 1.0, 4.0);
        assert_eq!(element.face_count(), 3);
        assert!(!element.face(0).unwrap().is_planar());
        assert!(element.face(2).unwrap().is_planar());
        assert_eq!(element.face(3), None);
    }

    #[test]
    fn test_translate_reference() {
        let mut element = Element::reference_cylinder("Cyl", DVec3::ZERO, 1.0, 4.0);
        element.translate(DVec3::new(0.0, 10.0, 0.0));
        assert_eq!(
            element.face(2),
            Some(GeometryObject::PlanarFace {
                normal: DVec3::Z,
                origin: DVec3::new(0.0, 10.0, 4.0),
            })
        );
    }
}
