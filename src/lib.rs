//! # Ski Jump Engine
//!
//! Slide and flight calculator for airbag ski jumps: exit speeds along an
//! in-run / transition / kicker ramp, then the ballistic flight that follows.

// Re-export the main types and functions
pub use cli_api::{simulate, SimulationError, SimulationParameters, SimulationResult, SlideSimulator};
pub use config::{Scenario, SegmentSpec};
pub use flight_solver::{solve_flight, FlightResult};
pub use geometry::{ramp_profile, takeoff_point, SlopeDirection, SlopeSegment};
pub use segment_solver::{solve_segment, solve_segments, SegmentResult};
pub use sweep::{friction_grid, sweep_friction, SweepPoint};
pub use trajectory_sampling::{FlaggedSample, TrajectoryFlag, TrajectoryPoint, TrajectorySamples};

// Module declarations
pub mod cli_api;
pub mod config;
pub mod constants;
pub mod flight_solver;
pub mod geometry;
pub mod logging;
pub mod segment_solver;
pub mod sweep;
pub mod trajectory_sampling;
