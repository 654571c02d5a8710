use serde::{Deserialize, Serialize};

/// Normalized pan/tilt/zoom coordinate space, each axis in `[0,1]`.
pub const FULL_RANGE: AxisRange = AxisRange { min: 0.0, max: 1.0 };

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl CameraPosition {
    pub fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self { x, y, zoom }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = ordered_pair(min, max);
        Self { min, max }
    }

    pub fn clamp(self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Rectangular clamp on allowed pan/tilt coordinates for one bed/camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Boundary {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            x: AxisRange::new(min_x, max_x),
            y: AxisRange::new(min_y, max_y),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }
}

/// Per-bed movement restriction, at most one active per camera session.
/// Immutable once loaded from the bed-asset association.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPreset {
    pub id: u64,
    pub range: Boundary,
}

impl BoundaryPreset {
    pub fn new(id: u64, range: Boundary) -> Self {
        Self { id, range }
    }
}

fn ordered_pair(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
