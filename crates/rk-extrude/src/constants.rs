//! Global constants for rk-extrude

/// Default profile width (model units)
pub const PROFILE_WIDTH: f64 = 5.0;

/// Default profile height (model units)
pub const PROFILE_HEIGHT: f64 = 5.0;

/// Default extrusion distance along the sketch plane normal
pub const EXTRUSION_DEPTH: f64 = 5.0;

/// Translation applied to a new extrusion after it is created
pub const PLACEMENT_OFFSET: [f64; 3] = [-16.0, 0.0, 0.0];

/// Normals at or below this length are rejected as degenerate
pub const NORMAL_TOLERANCE: f64 = 1e-9;

/// Points closer than this are considered coincident
pub const POINT_TOLERANCE: f64 = 1e-9;

/// Label of the transaction that wraps the extrusion command
pub const TRANSACTION_LABEL: &str = "Creating a new Extrusion";

/// Title of the notification shown when the command fails
pub const FAILURE_TITLE: &str = "Extrusion command failed";
