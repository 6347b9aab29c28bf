//! Extrusion command configuration
//!
//! Settings for the extrusion command that can be serialized and loaded from
//! RON configuration files. The defaults reproduce the reference behavior:
//! a 5 × 5 rectangle extruded 5 units and moved by (-16, 0, 0).

use std::path::Path;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{
    EXTRUSION_DEPTH, FAILURE_TITLE, NORMAL_TOLERANCE, PLACEMENT_OFFSET, POINT_TOLERANCE,
    PROFILE_HEIGHT, PROFILE_WIDTH, TRANSACTION_LABEL,
};

/// Configuration for [`ExtrudeCommand`](crate::command::ExtrudeCommand)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtrusionConfig {
    /// Width of the rectangular profile (local X)
    pub profile_width: f64,
    /// Height of the rectangular profile (local Y)
    pub profile_height: f64,
    /// Local position of the first profile corner
    pub profile_anchor: [f64; 2],
    /// Extrusion distance along the plane normal
    pub depth: f64,
    /// Translation applied to the new solid after creation
    pub placement_offset: [f64; 3],
    /// Label of the wrapping transaction
    pub transaction_label: String,
    /// Title used when reporting a failure
    pub failure_title: String,
    /// Explicit normals at or below this length are rejected
    pub normal_tolerance: f64,
    /// Distance under which two profile corners coincide
    pub point_tolerance: f64,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            profile_width: PROFILE_WIDTH,
            profile_height: PROFILE_HEIGHT,
            profile_anchor: [0.0, 0.0],
            depth: EXTRUSION_DEPTH,
            placement_offset: PLACEMENT_OFFSET,
            transaction_label: TRANSACTION_LABEL.to_string(),
            failure_title: FAILURE_TITLE.to_string(),
            normal_tolerance: NORMAL_TOLERANCE,
            point_tolerance: POINT_TOLERANCE,
        }
    }
}

impl ExtrusionConfig {
    /// Profile anchor as a vector
    pub fn anchor(&self) -> DVec2 {
        DVec2::from_array(self.profile_anchor)
    }

    /// Placement offset as a vector
    pub fn placement(&self) -> DVec3 {
        DVec3::from_array(self.placement_offset)
    }

    /// Check that the numeric settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("profile_width", self.profile_width),
            ("profile_height", self.profile_height),
            ("depth", self.depth),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let tolerances = [
            ("normal_tolerance", self.normal_tolerance),
            ("point_tolerance", self.point_tolerance),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !self.anchor().is_finite() || !self.placement().is_finite() {
            return Err(ConfigError::Invalid(
                "profile_anchor and placement_offset must be finite".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExtrusionConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Configuration-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
