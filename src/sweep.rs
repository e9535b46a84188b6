//! Friction sweeps.
//!
//! Runs the same slide at several friction coefficients. Every point is an
//! independent simulation, so the batch is spread across rayon's pool.

use crate::cli_api::{simulate, SimulationError, SimulationParameters};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

/// Summary of one slide run in a sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub friction_coefficient: f64,
    pub exit_velocity_kmh: f64,
    pub horizontal_range_m: f64,
    pub max_height_m: f64,
    pub knuckle_distance_m: f64,
    pub total_time_s: f64,
    pub stalled: bool,
}

/// Evenly spaced friction values from `start` to `end` inclusive
///
/// `steps` counts the points, not the gaps; fewer than two yields just `start`.
pub fn friction_grid(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start];
    }
    let delta = (end - start) / (steps - 1) as f64;
    (0..steps).map(|i| start + delta * i as f64).collect()
}

/// Simulate `base` at every friction coefficient in `frictions`
///
/// Results keep the order of `frictions`. The first invalid parameter set
/// aborts the whole sweep.
pub fn sweep_friction(
    base: &SimulationParameters,
    frictions: &[f64],
) -> Result<Vec<SweepPoint>, SimulationError> {
    info!("sweeping {} friction values", frictions.len());

    frictions
        .par_iter()
        .map(|&mu| {
            let mut params = base.clone();
            params.friction_coefficient = mu;
            let result = simulate(params)?;
            Ok(SweepPoint {
                friction_coefficient: mu,
                exit_velocity_kmh: result.final_exit_velocity_kmh(),
                horizontal_range_m: result.horizontal_range_m(),
                max_height_m: result.max_height_m(),
                knuckle_distance_m: result.knuckle_distance_m(),
                total_time_s: result.total_time_s,
                stalled: result.stalled(),
            })
        })
        .collect()
}
