//! Per-segment exit velocities via a work-energy balance.
//!
//! Each segment is treated as a straight incline with constant kinetic
//! friction. The kinetic energy at the exit is the entry energy plus (or minus)
//! the potential energy exchanged over the height change, minus the friction
//! work `μ·g·cos(θ)·L`. When the losses exceed the available energy the slider
//! stalls on that segment and the exit velocity saturates at zero.

use crate::constants::{G_ACCEL_MPS2, MPS_TO_KMH};
use crate::geometry::{SlopeDirection, SlopeSegment};
use log::{debug, warn};
use nalgebra::Vector2;
use serde::Serialize;

/// Outcome of sliding over one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentResult {
    pub index: usize,
    pub segment: SlopeSegment,
    pub entry_velocity_mps: f64,
    pub exit_velocity_mps: f64,
    pub exit_velocity_kmh: f64,
    pub elapsed_time_s: f64,
    pub stalled: bool,
    pub end_position: Vector2<f64>,  // path frame, origin at top of in-run
}

/// Friction work per unit mass over the whole segment (J/kg)
pub fn friction_work(segment: &SlopeSegment, friction_coefficient: f64) -> f64 {
    friction_coefficient * G_ACCEL_MPS2 * segment.angle.cos() * segment.length
}

/// Squared exit velocity before clamping
///
/// Negative values mean the slider cannot reach the end of the segment.
pub fn exit_velocity_squared(entry_velocity: f64, segment: &SlopeSegment, friction_coefficient: f64) -> f64 {
    let h = segment.height_change();
    let wf = friction_work(segment, friction_coefficient);

    match segment.direction {
        SlopeDirection::Descending => entry_velocity * entry_velocity + 2.0 * G_ACCEL_MPS2 * h - 2.0 * wf,
        SlopeDirection::Ascending => entry_velocity * entry_velocity - 2.0 * G_ACCEL_MPS2 * h - 2.0 * wf,
    }
}

/// Exit velocity with the stall clamp applied
pub fn exit_velocity(entry_velocity: f64, segment: &SlopeSegment, friction_coefficient: f64) -> f64 {
    exit_velocity_squared(entry_velocity, segment, friction_coefficient).max(0.0).sqrt()
}

/// Time spent on a segment
///
/// Uses half of the exit velocity as the representative speed, not the mean of
/// entry and exit. A stalled segment reports zero time.
pub fn segment_elapsed_time(segment: &SlopeSegment, exit_velocity_mps: f64) -> f64 {
    let representative = exit_velocity_mps / 2.0;
    if representative <= 0.0 {
        0.0
    } else {
        segment.length / representative
    }
}

/// Solve a single segment
///
/// `start_position` is where the segment begins in the path frame. Inputs are
/// assumed validated; nothing here can fail.
pub fn solve_segment(
    index: usize,
    entry_velocity: f64,
    segment: &SlopeSegment,
    friction_coefficient: f64,
    start_position: Vector2<f64>,
) -> SegmentResult {
    let v_squared = exit_velocity_squared(entry_velocity, segment, friction_coefficient);
    // Ending at rest counts as a stall, including never getting started
    let stalled = v_squared <= 0.0 && segment.length > 0.0;
    let exit = v_squared.max(0.0).sqrt();
    let elapsed = segment_elapsed_time(segment, exit);

    if stalled {
        warn!(
            "segment {} ({}, {:.1}°, {:.1} m) stalls: energy balance {:.3} m²/s² clamped to 0",
            index, segment.direction, segment.angle_degrees(), segment.length, v_squared
        );
    }
    debug!(
        "segment {}: entry {:.3} m/s -> exit {:.3} m/s in {:.3} s",
        index, entry_velocity, exit, elapsed
    );

    SegmentResult {
        index,
        segment: *segment,
        entry_velocity_mps: entry_velocity,
        exit_velocity_mps: exit,
        exit_velocity_kmh: exit * MPS_TO_KMH,
        elapsed_time_s: elapsed,
        stalled,
        end_position: start_position + segment.displacement(),
    }
}

/// Solve an ordered list of segments, threading each exit velocity into the next entry
///
/// The first segment starts from rest at the origin.
pub fn solve_segments(segments: &[SlopeSegment], friction_coefficient: f64) -> Vec<SegmentResult> {
    let mut results = Vec::with_capacity(segments.len());
    let mut velocity = 0.0;
    let mut position = Vector2::zeros();

    for (index, segment) in segments.iter().enumerate() {
        let result = solve_segment(index, velocity, segment, friction_coefficient, position);
        velocity = result.exit_velocity_mps;
        position = result.end_position;
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inrun() -> SlopeSegment {
        SlopeSegment::from_degrees(SlopeDirection::Descending, 40.0, 43.0)
    }

    #[test]
    fn test_inrun_exit_velocity_matches_reference() {
        let v = exit_velocity(0.0, &inrun(), 0.18);
        // 74.3 km/h
        assert_relative_eq!(v * MPS_TO_KMH, 74.3, max_relative = 0.01);
    }

    #[test]
    fn test_frictionless_flat_segment_preserves_speed() {
        let flat = SlopeSegment::descending(0.0, 25.0);
        assert_relative_eq!(exit_velocity(12.5, &flat, 0.0), 12.5, epsilon = 1e-12);

        let flat_up = SlopeSegment::ascending(0.0, 25.0);
        assert_relative_eq!(exit_velocity(12.5, &flat_up, 0.0), 12.5, epsilon = 1e-12);
    }

    #[test]
    fn test_friction_only_removes_energy() {
        let seg = inrun();
        let free = exit_velocity(3.0, &seg, 0.0);
        let rough = exit_velocity(3.0, &seg, 0.3);
        assert!(rough < free);
        assert_relative_eq!(
            free,
            (9.0 + 2.0 * G_ACCEL_MPS2 * seg.height_change()).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_steep_kicker_stalls_to_exact_zero() {
        let kicker = SlopeSegment::from_degrees(SlopeDirection::Ascending, 45.0, 50.0);
        let result = solve_segment(2, 5.0, &kicker, 0.2, Vector2::zeros());
        assert!(result.stalled);
        assert_eq!(result.exit_velocity_mps, 0.0);
        assert_eq!(result.exit_velocity_kmh, 0.0);
        assert_eq!(result.elapsed_time_s, 0.0);
        assert!(!result.exit_velocity_mps.is_nan());
    }

    #[test]
    fn test_flat_start_from_rest_is_stalled() {
        let flat = SlopeSegment::descending(0.0, 10.0);
        let result = solve_segment(0, 0.0, &flat, 0.0, Vector2::zeros());
        assert_eq!(result.exit_velocity_mps, 0.0);
        assert!(result.stalled);
        assert_eq!(result.elapsed_time_s, 0.0);
    }

    #[test]
    fn test_moving_slider_is_not_stalled() {
        let flat = SlopeSegment::descending(0.0, 10.0);
        let result = solve_segment(1, 4.0, &flat, 0.0, Vector2::zeros());
        assert!(!result.stalled);
        assert_relative_eq!(result.exit_velocity_mps, 4.0);
    }

    #[test]
    fn test_elapsed_time_uses_half_exit_velocity() {
        let seg = SlopeSegment::descending(0.0, 10.0);
        assert_relative_eq!(segment_elapsed_time(&seg, 5.0), 4.0, epsilon = 1e-12);
        assert_eq!(segment_elapsed_time(&seg, 0.0), 0.0);
    }

    #[test]
    fn test_solve_segments_threads_velocity_and_position() {
        let segments = vec![
            inrun(),
            SlopeSegment::descending(0.0, 10.0),
            SlopeSegment::from_degrees(SlopeDirection::Ascending, 30.0, 11.0),
        ];
        let results = solve_segments(&segments, 0.18);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].entry_velocity_mps, 0.0);
        for pair in results.windows(2) {
            assert_eq!(pair[1].entry_velocity_mps, pair[0].exit_velocity_mps);
            assert_relative_eq!(
                pair[1].end_position,
                pair[0].end_position + pair[1].segment.displacement(),
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(results[2].exit_velocity_kmh, 56.8, max_relative = 0.01);
        assert!(results.iter().all(|r| !r.stalled));
    }

    #[test]
    fn test_empty_segment_list() {
        assert!(solve_segments(&[], 0.1).is_empty());
    }
}
