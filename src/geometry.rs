use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Whether the slider loses or gains height along a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlopeDirection {
    /// In-run and transition: height converts into speed
    Descending,
    /// Kicker: speed converts into height
    Ascending,
}

impl SlopeDirection {
    /// Sign of the vertical projection in the path frame (y up)
    pub fn vertical_sign(&self) -> f64 {
        match self {
            SlopeDirection::Descending => -1.0,
            SlopeDirection::Ascending => 1.0,
        }
    }
}

impl std::fmt::Display for SlopeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SlopeDirection::Descending => write!(f, "descending"),
            SlopeDirection::Ascending => write!(f, "ascending"),
        }
    }
}

/// One straight ramp section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeSegment {
    pub angle: f64,     // radians from horizontal
    pub length: f64,    // meters along the slope
    pub direction: SlopeDirection,
}

impl SlopeSegment {
    pub fn new(direction: SlopeDirection, angle: f64, length: f64) -> Self {
        Self { angle, length, direction }
    }

    pub fn descending(angle: f64, length: f64) -> Self {
        Self::new(SlopeDirection::Descending, angle, length)
    }

    pub fn ascending(angle: f64, length: f64) -> Self {
        Self::new(SlopeDirection::Ascending, angle, length)
    }

    /// Build a segment from an angle in degrees
    pub fn from_degrees(direction: SlopeDirection, angle_deg: f64, length: f64) -> Self {
        Self::new(direction, angle_deg.to_radians(), length)
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Launch angle when this segment is the last one: negative when descending
    pub fn takeoff_angle(&self) -> f64 {
        match self.direction {
            SlopeDirection::Descending => -self.angle,
            SlopeDirection::Ascending => self.angle,
        }
    }

    /// Height difference between the two ends (always non-negative)
    pub fn height_change(&self) -> f64 {
        self.length * self.angle.sin()
    }

    /// Displacement from segment start to end in the path frame (x forward, y up)
    pub fn displacement(&self) -> Vector2<f64> {
        Vector2::new(
            self.length * self.angle.cos(),
            self.direction.vertical_sign() * self.height_change(),
        )
    }
}

/// Vertices of the ramp polyline, starting at the origin (top of the in-run)
///
/// Returns `segments.len() + 1` points; the last one is the takeoff point.
pub fn ramp_profile(segments: &[SlopeSegment]) -> Vec<Vector2<f64>> {
    let mut points = Vec::with_capacity(segments.len() + 1);
    let mut position = Vector2::zeros();
    points.push(position);

    for segment in segments {
        position += segment.displacement();
        points.push(position);
    }

    points
}

/// End of the last segment in the path frame
pub fn takeoff_point(segments: &[SlopeSegment]) -> Vector2<f64> {
    segments
        .iter()
        .fold(Vector2::zeros(), |acc, s| acc + s.displacement())
}
