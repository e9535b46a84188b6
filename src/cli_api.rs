// CLI API module - parameter record, result record and the solver chain
use crate::constants::{
    DEFAULT_TRAJECTORY_SAMPLES, DRAG_MAX, DRAG_MIN, FRICTION_MAX, FRICTION_MIN, MIN_TRAJECTORY_SAMPLES,
    MPS_TO_KMH,
};
use crate::flight_solver::{solve_flight, FlightResult};
use crate::geometry::{ramp_profile, SlopeDirection, SlopeSegment};
use crate::segment_solver::{solve_segments, SegmentResult};
use crate::trajectory_sampling::{sample_at_distance, FlaggedSample, TrajectorySamples};
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use thiserror::Error;

// Error type for simulation requests
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("a slide needs at least one segment")]
    NoSegments,

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimulationError {
    fn invalid(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        SimulationError::InvalidParameter {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

// Simulation input parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub friction_coefficient: f64,   // μ, dimensionless
    pub drag_coefficient: f64,       // Cd, reserved: not used by the formulas
    pub segments: Vec<SlopeSegment>, // in-run first, kicker last
    #[serde(default = "default_trajectory_samples")]
    pub trajectory_samples: usize,
}

fn default_trajectory_samples() -> usize {
    DEFAULT_TRAJECTORY_SAMPLES
}

impl Default for SimulationParameters {
    /// The reference slide: 40°/43 m in-run, flat 10 m transition, 30°/11 m kicker
    fn default() -> Self {
        Self {
            friction_coefficient: 0.18,
            drag_coefficient: 0.9,
            segments: vec![
                SlopeSegment::from_degrees(SlopeDirection::Descending, 40.0, 43.0),
                SlopeSegment::from_degrees(SlopeDirection::Descending, 0.0, 10.0),
                SlopeSegment::from_degrees(SlopeDirection::Ascending, 30.0, 11.0),
            ],
            trajectory_samples: DEFAULT_TRAJECTORY_SAMPLES,
        }
    }
}

impl SimulationParameters {
    pub fn new(friction_coefficient: f64, drag_coefficient: f64, segments: Vec<SlopeSegment>) -> Self {
        Self {
            friction_coefficient,
            drag_coefficient,
            segments,
            trajectory_samples: DEFAULT_TRAJECTORY_SAMPLES,
        }
    }

    /// Reject anything outside the documented ranges before the solver sees it
    pub fn validate(&self) -> Result<(), SimulationError> {
        check_range(
            "friction_coefficient",
            self.friction_coefficient,
            FRICTION_MIN,
            FRICTION_MAX,
        )?;
        check_range("drag_coefficient", self.drag_coefficient, DRAG_MIN, DRAG_MAX)?;

        if self.segments.is_empty() {
            return Err(SimulationError::NoSegments);
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if !segment.length.is_finite() || segment.length <= 0.0 {
                return Err(SimulationError::invalid(
                    format!("segments[{i}].length"),
                    format!("must be a positive number of meters, got {}", segment.length),
                ));
            }
            if !segment.angle.is_finite() || segment.angle < 0.0 || segment.angle >= FRAC_PI_2 {
                return Err(SimulationError::invalid(
                    format!("segments[{i}].angle"),
                    format!("must be in [0°, 90°), got {:.3}°", segment.angle.to_degrees()),
                ));
            }
        }

        if self.trajectory_samples < MIN_TRAJECTORY_SAMPLES {
            return Err(SimulationError::invalid(
                "trajectory_samples",
                format!("need at least {MIN_TRAJECTORY_SAMPLES}, got {}", self.trajectory_samples),
            ));
        }

        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), SimulationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(SimulationError::invalid(
            field,
            format!("must be within [{min}, {max}], got {value}"),
        ));
    }
    Ok(())
}

// Simulation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub parameters: SimulationParameters,
    pub segments: Vec<SegmentResult>,
    pub flight: FlightResult,
    pub takeoff_point: Vector2<f64>,
    pub total_time_s: f64,
}

impl SimulationResult {
    pub fn final_exit_velocity_mps(&self) -> f64 {
        self.flight.takeoff_velocity_mps
    }

    pub fn final_exit_velocity_kmh(&self) -> f64 {
        self.flight.takeoff_velocity_mps * MPS_TO_KMH
    }

    pub fn horizontal_range_m(&self) -> f64 {
        self.flight.horizontal_range_m
    }

    pub fn max_height_m(&self) -> f64 {
        self.flight.max_height_m
    }

    pub fn flight_time_s(&self) -> f64 {
        self.flight.flight_time_s
    }

    pub fn knuckle_distance_m(&self) -> f64 {
        self.flight.knuckle_distance_m
    }

    /// True if any segment clamped its energy balance to zero
    pub fn stalled(&self) -> bool {
        self.segments.iter().any(|s| s.stalled)
    }

    /// Ramp polyline vertices, origin at the top of the in-run
    pub fn ramp_profile(&self) -> Vec<Vector2<f64>> {
        ramp_profile(&self.parameters.segments)
    }

    /// Flight path samples in the path frame, restartable
    pub fn trajectory(&self) -> TrajectorySamples {
        self.flight
            .samples(self.takeoff_point, self.parameters.trajectory_samples)
    }

    /// Flight samples every `step_m` meters with takeoff/apex/knuckle/landing flags
    pub fn sampled_points(&self, step_m: f64) -> Vec<FlaggedSample> {
        sample_at_distance(&self.flight, step_m)
    }
}

// Slide simulator
pub struct SlideSimulator {
    params: SimulationParameters,
}

impl SlideSimulator {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// Validate, then run segments -> flight -> totals
    pub fn solve(&self) -> Result<SimulationResult, SimulationError> {
        self.params.validate()?;

        let segments = solve_segments(&self.params.segments, self.params.friction_coefficient);
        let last = segments.last().ok_or(SimulationError::NoSegments)?;

        // A descending last segment launches downward and never gets airborne
        let flight = solve_flight(last.exit_velocity_mps, last.segment.takeoff_angle());
        let takeoff_point = last.end_position;

        let total_time_s = segments.iter().map(|s| s.elapsed_time_s).sum::<f64>() + flight.flight_time_s;

        debug!(
            "simulation done: {} segments, exit {:.2} km/h, range {:.2} m, total {:.2} s",
            segments.len(),
            last.exit_velocity_kmh,
            flight.horizontal_range_m,
            total_time_s
        );

        Ok(SimulationResult {
            parameters: self.params.clone(),
            segments,
            flight,
            takeoff_point,
            total_time_s,
        })
    }
}

/// Run one simulation request
pub fn simulate(params: SimulationParameters) -> Result<SimulationResult, SimulationError> {
    SlideSimulator::new(params).solve()
}
