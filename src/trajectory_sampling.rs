use crate::constants::{G_ACCEL_MPS2, MIN_SAMPLE_STEP_M, SAMPLE_FLAG_TOLERANCE};
use crate::flight_solver::FlightResult;
use nalgebra::Vector2;
use serde::Serialize;

/// Notable events along the flight path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryFlag {
    Takeoff,
    Apex,
    Knuckle,
    Landing,
}

impl TrajectoryFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryFlag::Takeoff => "takeoff",
            TrajectoryFlag::Apex => "apex",
            TrajectoryFlag::Knuckle => "knuckle",
            TrajectoryFlag::Landing => "landing",
        }
    }
}

/// Single flight sample in the path frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub time_s: f64,
    pub x: f64,
    pub y: f64,
}

/// Evenly spaced in time over `[0, flight_time]`, both ends included
///
/// Each point is computed from `t` alone, so cloning the iterator restarts the
/// sequence without recomputing anything upstream.
#[derive(Debug, Clone)]
pub struct TrajectorySamples {
    flight: FlightResult,
    origin: Vector2<f64>,
    count: usize,
    next: usize,
}

impl TrajectorySamples {
    pub fn new(flight: FlightResult, origin: Vector2<f64>, count: usize) -> Self {
        // A grounded takeoff collapses to one point at the kicker lip
        let count = if flight.airborne { count.max(2) } else { 1 };
        Self { flight, origin, count, next: 0 }
    }

    fn point(&self, i: usize) -> TrajectoryPoint {
        let t = if self.count > 1 {
            self.flight.flight_time_s * i as f64 / (self.count - 1) as f64
        } else {
            0.0
        };
        TrajectoryPoint {
            time_s: t,
            x: self.origin.x + self.flight.vx * t,
            y: self.origin.y + self.flight.vy * t - 0.5 * G_ACCEL_MPS2 * t * t,
        }
    }
}

impl Iterator for TrajectorySamples {
    type Item = TrajectoryPoint;

    fn next(&mut self) -> Option<TrajectoryPoint> {
        if self.next >= self.count {
            return None;
        }
        let p = self.point(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrajectorySamples {}

/// Flight sample taken at a regular horizontal interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedSample {
    pub distance_m: f64,     // horizontal distance from the takeoff point
    pub height_m: f64,       // height relative to the takeoff point
    pub time_s: f64,
    pub flags: Vec<TrajectoryFlag>,
}

/// Sample the flight every `step_m` meters of horizontal distance
///
/// Takeoff, apex, knuckle and landing are flagged on the closest sample. Steps
/// below 0.1 m are raised to 0.1 m; non-positive steps give no samples.
pub fn sample_at_distance(flight: &FlightResult, step_m: f64) -> Vec<FlaggedSample> {
    let step_size = if step_m <= 0.0 {
        return Vec::new();
    } else if step_m < MIN_SAMPLE_STEP_M {
        MIN_SAMPLE_STEP_M
    } else {
        step_m
    };

    if !flight.airborne || flight.vx <= 0.0 {
        return vec![FlaggedSample {
            distance_m: 0.0,
            height_m: 0.0,
            time_s: 0.0,
            flags: vec![TrajectoryFlag::Takeoff],
        }];
    }

    let max_dist = flight.horizontal_range_m;
    let num_steps = (max_dist / step_size).floor() as usize;

    let mut distances: Vec<f64> = (0..=num_steps).map(|i| i as f64 * step_size).collect();
    if max_dist - distances.last().copied().unwrap_or(0.0) > SAMPLE_FLAG_TOLERANCE {
        distances.push(max_dist);
    }

    let mut samples: Vec<FlaggedSample> = distances
        .into_iter()
        .map(|d| {
            let t = d / flight.vx;
            let p = flight.position_at(t);
            FlaggedSample {
                distance_m: d,
                height_m: p.y,
                time_s: t,
                flags: Vec::new(),
            }
        })
        .collect();

    add_trajectory_flags(&mut samples, flight);
    samples
}

fn add_trajectory_flags(samples: &mut [FlaggedSample], flight: &FlightResult) {
    let events = [
        (TrajectoryFlag::Takeoff, 0.0),
        (TrajectoryFlag::Apex, flight.apex().x),
        (TrajectoryFlag::Knuckle, flight.knuckle_distance_m),
        (TrajectoryFlag::Landing, flight.horizontal_range_m),
    ];

    for (flag, distance) in events {
        if let Some(idx) = find_closest_sample_index(samples, distance) {
            let sample = &mut samples[idx];
            if !sample.flags.contains(&flag) {
                sample.flags.push(flag);
            }
        }
    }
}

/// Closest sample by horizontal distance (samples are sorted ascending)
fn find_closest_sample_index(samples: &[FlaggedSample], target_distance: f64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }

    let idx = samples.partition_point(|s| s.distance_m < target_distance);
    if idx == 0 {
        return Some(0);
    }
    if idx >= samples.len() {
        return Some(samples.len() - 1);
    }

    let before = target_distance - samples[idx - 1].distance_m;
    let after = samples[idx].distance_m - target_distance;
    if before <= after {
        Some(idx - 1)
    } else {
        Some(idx)
    }
}
