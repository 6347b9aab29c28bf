//! Seed document the CLI runs against

use glam::DVec3;
use rk_extrude::{DocumentKind, Element, InMemoryDocument};

/// A document holding a 10 unit reference box at the origin and a
/// reference cylinder standing next to it
pub fn seed_document(kind: DocumentKind) -> InMemoryDocument {
    let title = match kind {
        DocumentKind::Family => "Family1",
        DocumentKind::Project => "Project1",
    };
    InMemoryDocument::new(title, kind)
        .with_element(Element::reference_box("Box", DVec3::ZERO, DVec3::splat(10.0)))
        .with_element(Element::reference_cylinder(
            "Cylinder",
            DVec3::new(20.0, 0.0, 0.0),
            2.0,
            8.0,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_extrude::ModelDocument;

    #[test]
    fn test_seed_document() {
        let family = seed_document(DocumentKind::Family);
        assert_eq!(family.title(), "Family1");
        assert!(family.is_family_document());
        assert_eq!(family.elements().len(), 2);
        assert_eq!(family.revision(), 0);

        let project = seed_document(DocumentKind::Project);
        assert_eq!(project.kind(), DocumentKind::Project);
    }
}
