//! In-memory model document
//!
//! Holds an ordered list of elements and supports one open transaction at a
//! time. Starting a transaction snapshots the elements; rolling back restores
//! the snapshot, committing bumps the revision.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{
    DocumentError, DocumentKind, DocumentResult, Element, ElementId, ModelDocument,
    TransactionStatus,
};
use crate::feature::SolidFeature;
use crate::selection::{FaceRef, GeometryObject, GeometrySource};

/// A finished transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction label
    pub label: String,
    /// How the transaction ended
    pub status: TransactionStatus,
}

#[derive(Debug, Clone)]
struct OpenTransaction {
    label: String,
    snapshot: Vec<Element>,
    changes: usize,
}

/// A model document held entirely in memory
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    title: String,
    kind: DocumentKind,
    elements: Vec<Element>,
    revision: u64,
    open: Option<OpenTransaction>,
    log: Vec<TransactionRecord>,
}

impl InMemoryDocument {
    /// Create an empty document
    pub fn new(title: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            title: title.into(),
            kind,
            elements: Vec::new(),
            revision: 0,
            open: None,
            log: Vec::new(),
        }
    }

    /// Create an empty family document
    pub fn family(title: impl Into<String>) -> Self {
        Self::new(title, DocumentKind::Family)
    }

    /// Create an empty project document
    pub fn project(title: impl Into<String>) -> Self {
        Self::new(title, DocumentKind::Project)
    }

    /// Seed the document with an element (outside any transaction)
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// All elements in creation order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by ID
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get the extrusion feature of an element
    pub fn get_extrusion(&self, id: ElementId) -> Option<&SolidFeature> {
        self.get(id).and_then(Element::as_extrusion)
    }

    /// Iterate over extrusion features
    pub fn extrusions(&self) -> impl Iterator<Item = &SolidFeature> {
        self.elements.iter().filter_map(Element::as_extrusion)
    }

    /// Number of committed mutations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Finished transactions, oldest first
    pub fn transaction_log(&self) -> &[TransactionRecord] {
        &self.log
    }

    /// Label of the open transaction
    pub fn open_transaction_label(&self) -> Option<&str> {
        self.open.as_ref().map(|t| t.label.as_str())
    }

    fn open_mut(&mut self) -> DocumentResult<&mut OpenTransaction> {
        self.open.as_mut().ok_or(DocumentError::NoOpenTransaction)
    }

    fn finish(&mut self, label: String, status: TransactionStatus) {
        self.log.push(TransactionRecord { label, status });
    }
}

impl GeometrySource for InMemoryDocument {
    fn geometry_object(&self, reference: &FaceRef) -> Option<GeometryObject> {
        self.get(reference.element)?.face(reference.index as usize)
    }

    fn face_references(&self) -> Vec<FaceRef> {
        self.elements
            .iter()
            .flat_map(|e| (0..e.face_count() as u32).map(|i| FaceRef::new(e.id, i)))
            .collect()
    }
}

impl ModelDocument for InMemoryDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> DocumentKind {
        self.kind
    }

    fn start_transaction(&mut self, label: &str) -> DocumentResult<()> {
        if let Some(open) = &self.open {
            return Err(DocumentError::TransactionAlreadyOpen(open.label.clone()));
        }
        self.open = Some(OpenTransaction {
            label: label.to_string(),
            snapshot: self.elements.clone(),
            changes: 0,
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> DocumentResult<()> {
        let open = self.open.take().ok_or(DocumentError::NoOpenTransaction)?;
        if open.changes > 0 {
            self.revision += 1;
        }
        self.finish(open.label, TransactionStatus::Committed);
        Ok(())
    }

    fn rollback_transaction(&mut self) -> DocumentResult<()> {
        let open = self.open.take().ok_or(DocumentError::NoOpenTransaction)?;
        self.elements = open.snapshot;
        self.finish(open.label, TransactionStatus::RolledBack);
        Ok(())
    }

    fn has_open_transaction(&self) -> bool {
        self.open.is_some()
    }

    fn add_extrusion(&mut self, feature: SolidFeature) -> DocumentResult<ElementId> {
        self.open_mut()?.changes += 1;
        let element = Element::extrusion(feature);
        let id = element.id;
        self.elements.push(element);
        Ok(id)
    }

    fn move_element(&mut self, id: ElementId, offset: DVec3) -> DocumentResult<()> {
        self.open_mut()?;
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DocumentError::ElementNotFound(id))?;
        element.translate(offset);
        self.open_mut()?.changes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::default_kernel;
    use crate::sketch::{Plane, ProfileBuilder};

    fn feature() -> SolidFeature {
        let profile = ProfileBuilder::default().build().unwrap();
        SolidFeature::extrude("Extrusion", &*default_kernel(), Plane::xy(), profile, 5.0).unwrap()
    }

    #[test]
    fn test_mutation_requires_transaction() {
        let mut doc = InMemoryDocument::family("Family1");
        assert_eq!(
            doc.add_extrusion(feature()),
            Err(DocumentError::NoOpenTransaction)
        );
        assert!(doc.elements().is_empty());
        assert_eq!(doc.commit_transaction(), Err(DocumentError::NoOpenTransaction));
        assert_eq!(doc.rollback_transaction(), Err(DocumentError::NoOpenTransaction));
    }

    #[test]
    fn test_commit_bumps_revision() {
        let mut doc = InMemoryDocument::family("Family1");
        doc.start_transaction("Add").unwrap();
        assert_eq!(doc.open_transaction_label(), Some("Add"));
        let id = doc.add_extrusion(feature()).unwrap();
        doc.move_element(id, DVec3::new(-16.0, 0.0, 0.0)).unwrap();
        doc.commit_transaction().unwrap();

        assert_eq!(doc.revision(), 1);
        assert_eq!(doc.extrusions().count(), 1);
        assert_eq!(
            doc.get_extrusion(id).unwrap().placement,
            DVec3::new(-16.0, 0.0, 0.0)
        );
        assert_eq!(
            doc.transaction_log(),
            &[TransactionRecord {
                label: "Add".into(),
                status: TransactionStatus::Committed,
            }]
        );
    }

    #[test]
    fn test_empty_commit_keeps_revision() {
        let mut doc = InMemoryDocument::family("Family1");
        doc.start_transaction("Nothing").unwrap();
        doc.commit_transaction().unwrap();
        assert_eq!(doc.revision(), 0);
        assert_eq!(doc.transaction_log().len(), 1);
    }

    #[test]
    fn test_rollback_restores_elements() {
        let mut doc = InMemoryDocument::family("Family1")
            .with_element(Element::reference_box("Box", DVec3::ZERO, DVec3::ONE));
        let before = doc.elements().to_vec();
        let box_id = before[0].id;

        doc.start_transaction("Edit").unwrap();
        doc.add_extrusion(feature()).unwrap();
        doc.move_element(box_id, DVec3::Y).unwrap();
        doc.rollback_transaction().unwrap();

        assert_eq!(doc.elements(), before.as_slice());
        assert_eq!(doc.revision(), 0);
        assert_eq!(
            doc.transaction_log()[0].status,
            TransactionStatus::RolledBack
        );
    }

    #[test]
    fn test_move_unknown_element() {
        let mut doc = InMemoryDocument::family("Family1");
        doc.start_transaction("Move").unwrap();
        let id = ElementId::new();
        assert_eq!(
            doc.move_element(id, DVec3::X),
            Err(DocumentError::ElementNotFound(id))
        );
    }

    #[test]
    fn test_face_references_cover_all_elements() {
        let mut doc = InMemoryDocument::family("Family1")
            .with_element(Element::reference_box("Box", DVec3::ZERO, DVec3::ONE))
            .with_element(Element::reference_cylinder("Cyl", DVec3::ZERO, 1.0, 1.0));
        doc.start_transaction("Add").unwrap();
        doc.add_extrusion(feature()).unwrap();
        doc.commit_transaction().unwrap();

        let faces = doc.face_references();
        assert_eq!(faces.len(), 6 + 3 + 6);
        for face in &faces {
            assert!(doc.geometry_object(face).is_some());
        }
    }

    #[test]
    fn test_kind() {
        assert!(InMemoryDocument::family("F").is_family_document());
        assert!(!InMemoryDocument::project("P").is_family_document());
        assert_eq!(InMemoryDocument::project("P").kind(), DocumentKind::Project);
    }
}
