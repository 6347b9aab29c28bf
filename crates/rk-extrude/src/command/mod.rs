//! Extrusion Command
//!
//! Resolves a sketch plane, builds the rectangular profile, extrudes it,
//! moves the new solid and commits everything as one transaction. Any
//! failure rolls the transaction back, so the document either gains exactly
//! one extrusion or is left untouched.

mod notify;

use glam::DVec3;
use serde::Serialize;
use thiserror::Error;

use crate::config::ExtrusionConfig;
use crate::document::{DocumentError, ElementId, ModelDocument, TransactionScope};
use crate::feature::SolidFeature;
use crate::kernel::{CadError, CadKernel, default_kernel};
use crate::selection::FacePicker;
use crate::sketch::{Plane, PlaneResolver, PlaneSource, ProfileBuilder, SketchError};

pub use notify::{CollectingNotifier, Notifier, TracingNotifier};

/// Errors reported by the extrusion command
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("No face was selected")]
    NoSelection,

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Please open a Family document before invoking this command.")]
    WrongDocumentKind,

    #[error("Degenerate profile: corner {index} coincides with the next corner")]
    DegenerateProfile { index: usize },

    #[error("Create new Extrusion failed: {0}")]
    ExtrusionFailed(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl From<SketchError> for CommandError {
    fn from(err: SketchError) -> Self {
        match err {
            SketchError::NoSelection => CommandError::NoSelection,
            SketchError::UnsupportedGeometry(msg) => CommandError::UnsupportedGeometry(msg),
            SketchError::DegenerateProfile { index } => CommandError::DegenerateProfile { index },
        }
    }
}

impl From<CadError> for CommandError {
    fn from(err: CadError) -> Self {
        CommandError::ExtrusionFailed(err.to_string())
    }
}

/// Result reported back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandOutcome {
    Succeeded,
    Failed,
}

/// The extrusion a successful run committed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommittedExtrusion {
    /// Element holding the new solid
    pub element_id: ElementId,
    /// The feature as committed (after placement)
    pub feature: SolidFeature,
}

impl CommittedExtrusion {
    /// Sketch plane the profile was drawn on
    pub fn plane(&self) -> &Plane {
        &self.feature.plane
    }

    /// Offset applied after creation
    pub fn placement(&self) -> DVec3 {
        self.feature.placement
    }
}

/// Creates a placed rectangular extrusion in a single transaction
pub struct ExtrudeCommand {
    kernel: Box<dyn CadKernel>,
    config: ExtrusionConfig,
}

impl Default for ExtrudeCommand {
    fn default() -> Self {
        Self::new(default_kernel())
    }
}

impl ExtrudeCommand {
    /// Command with the default settings
    pub fn new(kernel: Box<dyn CadKernel>) -> Self {
        Self::with_config(kernel, ExtrusionConfig::default())
    }

    /// Command with custom settings
    pub fn with_config(kernel: Box<dyn CadKernel>, config: ExtrusionConfig) -> Self {
        Self { kernel, config }
    }

    /// Active settings
    pub fn config(&self) -> &ExtrusionConfig {
        &self.config
    }

    /// Name of the geometry kernel in use
    pub fn kernel_name(&self) -> &str {
        self.kernel.name()
    }

    /// Run the command and notify on failure
    pub fn execute<D>(
        &self,
        document: &mut D,
        source: &PlaneSource,
        picker: &mut dyn FacePicker,
        notifier: &mut dyn Notifier,
    ) -> CommandOutcome
    where
        D: ModelDocument + ?Sized,
    {
        let result = self.try_execute(document, source, picker);
        self.report(&result, notifier)
    }

    /// Turn a command result into an outcome, notifying on failure
    pub fn report(
        &self,
        result: &Result<CommittedExtrusion, CommandError>,
        notifier: &mut dyn Notifier,
    ) -> CommandOutcome {
        match result {
            Ok(_) => CommandOutcome::Succeeded,
            Err(e) => {
                notifier.notify_failure(&self.config.failure_title, &e.to_string());
                CommandOutcome::Failed
            }
        }
    }

    /// Run the command
    ///
    /// On error the transaction has been rolled back before this returns. A
    /// rollback that itself fails is logged; the original error is returned.
    pub fn try_execute<D>(
        &self,
        document: &mut D,
        source: &PlaneSource,
        picker: &mut dyn FacePicker,
    ) -> Result<CommittedExtrusion, CommandError>
    where
        D: ModelDocument + ?Sized,
    {
        let mut scope = TransactionScope::start(document, self.config.transaction_label.as_str())?;

        match self.create(scope.document_mut(), source, picker) {
            Ok(committed) => {
                scope.commit()?;
                tracing::info!(
                    "Committed extrusion {} (plane normal {}, placement {})",
                    committed.element_id,
                    committed.feature.plane.normal,
                    committed.feature.placement
                );
                Ok(committed)
            }
            Err(e) => {
                tracing::warn!("Extrusion failed, rolling back: {}", e);
                // The extrusion error is what the user needs to see
                if let Err(rollback) = scope.roll_back() {
                    tracing::error!(
                        "Failed to roll back '{}' after error: {}",
                        self.config.transaction_label,
                        rollback
                    );
                }
                Err(e)
            }
        }
    }

    /// The steps that run inside the transaction
    fn create<D>(
        &self,
        document: &mut D,
        source: &PlaneSource,
        picker: &mut dyn FacePicker,
    ) -> Result<CommittedExtrusion, CommandError>
    where
        D: ModelDocument + ?Sized,
    {
        if !document.is_family_document() {
            return Err(CommandError::WrongDocumentKind);
        }

        let plane = PlaneResolver::new(self.config.normal_tolerance).resolve(
            source,
            &*document,
            picker,
        )?;
        tracing::debug!("Sketch plane: normal {}, origin {}", plane.normal, plane.origin);

        let profile = ProfileBuilder::from_config(&self.config).build()?;

        let mut feature = SolidFeature::extrude(
            "Extrusion",
            self.kernel.as_ref(),
            plane,
            profile,
            self.config.depth,
        )?;
        let element_id = document.add_extrusion(feature.clone())?;

        let offset = self.config.placement();
        document.move_element(element_id, offset)?;
        feature.translate(offset);

        Ok(CommittedExtrusion {
            element_id,
            feature,
        })
    }
}
