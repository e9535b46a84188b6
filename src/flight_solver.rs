//! Ballistic flight after the kicker.
//!
//! Drag-free projectile motion from the takeoff point. Flight ends when the
//! slider returns to launch height; the landing hill itself is not modelled.

use crate::constants::{G_ACCEL_MPS2, KNUCKLE_RATIO};
use crate::trajectory_sampling::TrajectorySamples;
use log::debug;
use nalgebra::Vector2;
use serde::Serialize;

/// Flight metrics for one takeoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightResult {
    pub takeoff_velocity_mps: f64,
    pub takeoff_angle_rad: f64,
    pub vx: f64,                    // m/s
    pub vy: f64,                    // m/s
    pub flight_time_s: f64,
    pub horizontal_range_m: f64,
    pub max_height_m: f64,          // above the takeoff point
    pub knuckle_distance_m: f64,
    pub airborne: bool,
}

impl FlightResult {
    /// Displacement from the takeoff point at time `t`
    pub fn position_at(&self, t: f64) -> Vector2<f64> {
        Vector2::new(
            self.vx * t,
            self.vy * t - 0.5 * G_ACCEL_MPS2 * t * t,
        )
    }

    /// Displacement of the highest point relative to takeoff
    pub fn apex(&self) -> Vector2<f64> {
        if !self.airborne {
            return Vector2::zeros();
        }
        Vector2::new(self.horizontal_range_m / 2.0, self.max_height_m)
    }

    /// Lazy, restartable samples of the flight path offset by `takeoff`
    pub fn samples(&self, takeoff: Vector2<f64>, count: usize) -> TrajectorySamples {
        TrajectorySamples::new(*self, takeoff, count)
    }
}

/// Compute the flight phase from the final exit velocity and the kicker angle
///
/// A takeoff without upward velocity yields no airborne phase: every metric is
/// zero and `airborne` is false.
pub fn solve_flight(exit_velocity: f64, takeoff_angle: f64) -> FlightResult {
    let vx = exit_velocity * takeoff_angle.cos();
    let vy = exit_velocity * takeoff_angle.sin();

    if vy <= 0.0 {
        debug!("no airborne phase: vy = {:.3} m/s", vy);
        return FlightResult {
            takeoff_velocity_mps: exit_velocity,
            takeoff_angle_rad: takeoff_angle,
            vx,
            vy,
            flight_time_s: 0.0,
            horizontal_range_m: 0.0,
            max_height_m: 0.0,
            knuckle_distance_m: 0.0,
            airborne: false,
        };
    }

    let flight_time = 2.0 * vy / G_ACCEL_MPS2;
    let horizontal_range = vx * flight_time;
    let max_height = vy * vy / (2.0 * G_ACCEL_MPS2);

    debug!(
        "flight: vx {:.3} m/s, vy {:.3} m/s, {:.3} s, range {:.3} m, apex {:.3} m",
        vx, vy, flight_time, horizontal_range, max_height
    );

    FlightResult {
        takeoff_velocity_mps: exit_velocity,
        takeoff_angle_rad: takeoff_angle,
        vx,
        vy,
        flight_time_s: flight_time,
        horizontal_range_m: horizontal_range,
        max_height_m: max_height,
        knuckle_distance_m: horizontal_range * KNUCKLE_RATIO,
        airborne: true,
    }
}
