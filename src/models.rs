use image::{GrayImage, RgbImage};
use imageproc::point::Point;

/// One color frame from the source
pub type Frame = RgbImage;

/// Binary mask: 255 = foreground, 0 = background
pub type Mask = GrayImage;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Outer boundary of one connected foreground component
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Closed polygon, corners only (straight runs are compressed)
    pub points: Vec<Point<i32>>,
}

impl Region {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Enclosed polygon area (shoelace formula)
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0i64;
        for i in 0..n {
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % n];
            twice_area += p1.x as i64 * p2.y as i64 - p2.x as i64 * p1.y as i64;
        }
        (twice_area as f64 / 2.0).abs()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-frame outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    /// No foreground region survived cleaning
    NoRegion,
    /// Dominant region is too small to be the ball
    Noise { radius: f32 },
    /// Ball found
    Valid { center: (f32, f32), radius: f32 },
}

impl Detection {
    pub fn is_valid(&self) -> bool {
        matches!(self, Detection::Valid { .. })
    }

    pub fn radius(&self) -> Option<f32> {
        match self {
            Detection::NoRegion => None,
            Detection::Noise { radius } | Detection::Valid { radius, .. } => Some(*radius),
        }
    }

    pub fn center(&self) -> Option<(f32, f32)> {
        match self {
            Detection::Valid { center, .. } => Some(*center),
            _ => None,
        }
    }
}

/// Every intermediate product of one frame, for debugging and tests
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    pub mask: Mask,
    pub cleaned: Mask,
    pub regions: Vec<Region>,
    /// Index into `regions` of the dominant region
    pub selected: Option<usize>,
    pub detection: Detection,
}
