//! Model Documents
//!
//! The host document the extrusion command mutates. All mutation goes
//! through the transactional API of [`ModelDocument`]; [`TransactionScope`]
//! guarantees that every started transaction is either committed or rolled
//! back. [`InMemoryDocument`] is a self-contained host implementation.

mod element;
mod memory;
mod transaction;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::feature::SolidFeature;
use crate::selection::GeometrySource;

pub use element::{Element, ElementBody};
pub use memory::{InMemoryDocument, TransactionRecord};
pub use transaction::{TransactionScope, TransactionStatus};

/// Unique identifier for an element in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of model document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Feature-authoring document that defines reusable solids
    #[default]
    Family,
    /// Project document that only places families
    Project,
}

impl DocumentKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Family => "family",
            DocumentKind::Project => "project",
        }
    }
}

/// Document-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("Transaction '{0}' is already open")]
    TransactionAlreadyOpen(String),

    #[error("No transaction is open")]
    NoOpenTransaction,

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// A host document that can be modified inside transactions
///
/// Mutating calls fail with [`DocumentError::NoOpenTransaction`] when no
/// transaction is open.
pub trait ModelDocument: GeometrySource {
    /// Document title
    fn title(&self) -> &str;

    /// Kind of document
    fn kind(&self) -> DocumentKind;

    /// Whether solids can be authored in this document
    fn is_family_document(&self) -> bool {
        self.kind() == DocumentKind::Family
    }

    /// Open a transaction
    fn start_transaction(&mut self, label: &str) -> DocumentResult<()>;

    /// Make the changes of the open transaction permanent
    fn commit_transaction(&mut self) -> DocumentResult<()>;

    /// Discard the changes of the open transaction
    fn rollback_transaction(&mut self) -> DocumentResult<()>;

    /// Whether a transaction is currently open
    fn has_open_transaction(&self) -> bool;

    /// Add an extrusion element
    fn add_extrusion(&mut self, feature: SolidFeature) -> DocumentResult<ElementId>;

    /// Translate an element
    fn move_element(&mut self, id: ElementId, offset: DVec3) -> DocumentResult<()>;
}
