/// Physical and slide-design constants used in the solver chain

/// Gravitational acceleration in m/s²
///
/// Fixed at 9.81 rather than the standard 9.80665; published reference values
/// for slide exit speeds were computed with this figure.
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Fraction of the horizontal flight range at which the landing knuckle is placed
///
/// Empirical design convention for airbag landing ramps. Not derived from the
/// flight equations.
pub const KNUCKLE_RATIO: f64 = 0.65;

/// Conversion factor: meters per second to kilometers per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Default number of flight samples produced for plotting
pub const DEFAULT_TRAJECTORY_SAMPLES: usize = 100;

/// Minimum number of flight samples (both ends of the flight)
pub const MIN_TRAJECTORY_SAMPLES: usize = 2;

// Parameter ranges accepted at the boundary

/// Friction coefficient lower bound
pub const FRICTION_MIN: f64 = 0.0;

/// Friction coefficient upper bound
pub const FRICTION_MAX: f64 = 0.5;

/// Drag coefficient lower bound
pub const DRAG_MIN: f64 = 0.1;

/// Drag coefficient upper bound
pub const DRAG_MAX: f64 = 0.9;

/// Largest slider angle offered to designers, in degrees
pub const DESIGN_ANGLE_MAX_DEG: f64 = 60.0;

// Numerical tolerances

/// Tolerance used when tagging trajectory samples (meters)
pub const SAMPLE_FLAG_TOLERANCE: f64 = 1e-6;

/// Minimum horizontal step for distance-based sampling (meters)
pub const MIN_SAMPLE_STEP_M: f64 = 0.1;
