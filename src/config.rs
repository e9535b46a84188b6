//! Scenario files.
//!
//! Designers keep slide layouts as small JSON documents with angles in degrees.
//! They are converted to [`SimulationParameters`] (radians) at load time.

use crate::cli_api::{SimulationError, SimulationParameters};
use crate::constants::DEFAULT_TRAJECTORY_SAMPLES;
use crate::geometry::{SlopeDirection, SlopeSegment};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One segment as written in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub direction: SlopeDirection,
    pub angle_deg: f64,
    pub length_m: f64,
}

impl From<&SegmentSpec> for SlopeSegment {
    fn from(spec: &SegmentSpec) -> Self {
        SlopeSegment::from_degrees(spec.direction, spec.angle_deg, spec.length_m)
    }
}

impl From<&SlopeSegment> for SegmentSpec {
    fn from(segment: &SlopeSegment) -> Self {
        SegmentSpec {
            direction: segment.direction,
            angle_deg: segment.angle_degrees(),
            length_m: segment.length,
        }
    }
}

/// Scenario file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub friction_coefficient: f64,
    pub drag_coefficient: f64,
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub trajectory_samples: Option<usize>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path)?;
        let scenario = Self::from_json(&text)?;
        info!(
            "loaded scenario {} from {} ({} segments)",
            scenario.name.as_deref().unwrap_or("<unnamed>"),
            path.display(),
            scenario.segments.len()
        );
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to solver parameters; range checks happen in the simulator
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            friction_coefficient: self.friction_coefficient,
            drag_coefficient: self.drag_coefficient,
            segments: self.segments.iter().map(SlopeSegment::from).collect(),
            trajectory_samples: self.trajectory_samples.unwrap_or(DEFAULT_TRAJECTORY_SAMPLES),
        }
    }
}

impl From<&SimulationParameters> for Scenario {
    fn from(params: &SimulationParameters) -> Self {
        Scenario {
            name: None,
            friction_coefficient: params.friction_coefficient,
            drag_coefficient: params.drag_coefficient,
            segments: params.segments.iter().map(SegmentSpec::from).collect(),
            trajectory_samples: Some(params.trajectory_samples),
        }
    }
}
