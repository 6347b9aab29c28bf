//! Transactional Extrusion Command
//!
//! This crate provides:
//! - Sketch plane resolution from explicit input or a picked face
//! - Rectangular profile construction on the sketch plane
//! - An abstract CAD kernel trait with a Truck B-Rep backend
//! - A host document abstraction with transaction scopes
//! - The extrusion command that ties these together atomically

pub mod command;
pub mod config;
pub mod constants;
pub mod document;
pub mod feature;
pub mod kernel;
pub mod selection;
pub mod sketch;

// Re-exports for convenience
pub use command::{
    CollectingNotifier, CommandError, CommandOutcome, CommittedExtrusion, ExtrudeCommand,
    Notifier, TracingNotifier,
};
pub use config::{ConfigError, ExtrusionConfig};
pub use document::{
    DocumentError, DocumentKind, DocumentResult, Element, ElementBody, ElementId,
    InMemoryDocument, ModelDocument, TransactionRecord, TransactionScope, TransactionStatus,
};
pub use feature::SolidFeature;
pub use kernel::{CadError, CadKernel, CadResult, NullKernel, Solid, SolidFace, default_kernel};
#[cfg(feature = "truck")]
pub use kernel::TruckKernel;
pub use selection::{
    FacePicker, FaceRef, GeometryObject, GeometrySource, PresetPicker, SelectionError,
};
pub use sketch::{
    CurveSegment, Plane, PlaneResolver, PlaneSource, ProfileBuilder, ProfileLoop, SketchError,
    SketchResult,
};
