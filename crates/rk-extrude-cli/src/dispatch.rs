//! Runs the extrusion command the way a host dispatcher would

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use rk_extrude::{
    CommandError, CommandOutcome, CommittedExtrusion, DocumentKind, ElementId, ExtrudeCommand,
    ExtrusionConfig, FacePicker, FaceRef, InMemoryDocument, ModelDocument, Notifier, PlaneSource,
    PresetPicker, default_kernel,
};
use serde::Serialize;

use crate::args::{Cli, Commands, FaceSpec};
use crate::picker::{PromptPicker, face_options};
use crate::scene;

/// Prints failures to stderr like a modal dialog would show them
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_failure(&mut self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

/// Summary of a committed extrusion
#[derive(Debug, Serialize)]
pub struct ExtrusionSummary {
    pub element_id: ElementId,
    pub plane_normal: [f64; 3],
    pub plane_origin: [f64; 3],
    pub corners: Vec<[f64; 3]>,
    pub depth: f64,
    pub placement: [f64; 3],
    pub volume: f64,
}

impl From<&CommittedExtrusion> for ExtrusionSummary {
    fn from(committed: &CommittedExtrusion) -> Self {
        let feature = &committed.feature;
        Self {
            element_id: committed.element_id,
            plane_normal: feature.plane.normal.to_array(),
            plane_origin: feature.plane.origin.to_array(),
            corners: feature.profile.corners().iter().map(|c| c.to_array()).collect(),
            depth: feature.depth,
            placement: feature.placement.to_array(),
            volume: feature.solid.volume,
        }
    }
}

/// What one invocation did
#[derive(Debug, Serialize)]
pub struct InvocationReport {
    pub run: u32,
    pub outcome: CommandOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion: Option<ExtrusionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub revision: u64,
}

impl InvocationReport {
    fn new(
        run: u32,
        outcome: CommandOutcome,
        result: &Result<CommittedExtrusion, CommandError>,
        revision: u64,
    ) -> Self {
        let (extrusion, error) = match result {
            Ok(committed) => (Some(ExtrusionSummary::from(committed)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            run,
            outcome,
            extrusion,
            error,
            revision,
        }
    }
}

impl fmt::Display for InvocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_vec = |v: &[f64; 3]| format!("({}, {}, {})", v[0], v[1], v[2]);
        match (&self.extrusion, &self.error) {
            (Some(e), _) => write!(
                f,
                "[{}] Succeeded: extrusion {} on plane normal {} origin {}, depth {}, placed at {}, volume {} (revision {})",
                self.run,
                e.element_id,
                fmt_vec(&e.plane_normal),
                fmt_vec(&e.plane_origin),
                e.depth,
                fmt_vec(&e.placement),
                e.volume,
                self.revision
            ),
            (None, Some(error)) => write!(f, "[{}] Failed: {}", self.run, error),
            (None, None) => write!(f, "[{}] {:?}", self.run, self.outcome),
        }
    }
}

/// Execute the parsed command line, writing reports to `out`
///
/// Returns whether every invocation succeeded.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => ExtrusionConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtrusionConfig::default(),
    };

    if let Commands::DefaultConfig { output } = &cli.command {
        let defaults = ExtrusionConfig::default();
        match output {
            Some(path) => {
                defaults
                    .save(path)
                    .with_context(|| format!("Failed to write config {}", path.display()))?;
                tracing::info!("Wrote default config to {}", path.display());
            }
            None => writeln!(out, "{}", defaults.to_ron_string()?)?,
        }
        return Ok(true);
    }

    let kind = if cli.project {
        DocumentKind::Project
    } else {
        DocumentKind::Family
    };
    let mut document = scene::seed_document(kind);
    let command = ExtrudeCommand::with_config(default_kernel(), config);
    tracing::info!(
        "Running with {} kernel on {} document '{}'",
        command.kernel_name(),
        document.kind().name(),
        document.title()
    );

    let mut notifier = ConsoleNotifier;
    let mut all_succeeded = true;
    for run in 1..=cli.repeat {
        let (source, mut picker) = plane_source(&cli.command, &document)?;
        let result = command.try_execute(&mut document, &source, picker.as_mut());
        let outcome = command.report(&result, &mut notifier);
        all_succeeded &= outcome == CommandOutcome::Succeeded;

        let report = InvocationReport::new(run, outcome, &result, document.revision());
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        } else {
            writeln!(out, "{report}")?;
        }
    }

    Ok(all_succeeded)
}

fn plane_source(
    command: &Commands,
    document: &InMemoryDocument,
) -> Result<(PlaneSource, Box<dyn FacePicker>)> {
    let source = match command {
        Commands::Explicit { normal, origin } => PlaneSource::explicit(*normal, *origin),
        _ => PlaneSource::PickedFace,
    };
    let picker: Box<dyn FacePicker> = match command {
        Commands::Explicit { .. } => Box::new(PresetPicker::cancelled()),
        Commands::Pick { face: Some(spec) } => {
            Box::new(PresetPicker::new(face_ref(document, *spec)?))
        }
        Commands::Pick { face: None } => Box::new(PromptPicker::new(
            std::io::stdin().lock(),
            std::io::stderr(),
            face_options(document),
        )),
        Commands::DefaultConfig { .. } => anyhow::bail!("default-config does not extrude"),
    };
    Ok((source, picker))
}

fn face_ref(document: &InMemoryDocument, spec: FaceSpec) -> Result<FaceRef> {
    let element = document.elements().get(spec.element).with_context(|| {
        format!(
            "No element at position {} (document has {})",
            spec.element,
            document.elements().len()
        )
    })?;
    Ok(FaceRef::new(element.id, spec.face))
}
