use imageproc::point::Point;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::models::{Detection, Region};

const EPS: f64 = 1e-7;

/// Fixed seed keeps the fit reproducible frame to frame
const SHUFFLE_SEED: u64 = 0x5eed_ba11;

/// Circle in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: (f32, f32),
    pub radius: f32,
}

#[derive(Clone, Copy)]
struct Disk {
    x: f64,
    y: f64,
    r: f64,
}

impl Disk {
    fn point(p: (f64, f64)) -> Self {
        Self { x: p.0, y: p.1, r: 0.0 }
    }

    fn diameter(a: (f64, f64), b: (f64, f64)) -> Self {
        let x = (a.0 + b.0) / 2.0;
        let y = (a.1 + b.1) / 2.0;
        Self { x, y, r: dist((x, y), a) }
    }

    /// Circumcircle, or the widest diameter when the points are collinear
    fn through(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let (bx, by) = (b.0 - a.0, b.1 - a.1);
        let (cx, cy) = (c.0 - a.0, c.1 - a.1);
        let d = 2.0 * (bx * cy - by * cx);
        if d.abs() < EPS {
            return [Self::diameter(a, b), Self::diameter(a, c), Self::diameter(b, c)]
                .into_iter()
                .fold(Self::point(a), |best, disk| if disk.r > best.r { disk } else { best });
        }
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;
        Self { x: a.0 + ux, y: a.1 + uy, r: (ux * ux + uy * uy).sqrt() }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        dist((self.x, self.y), p) <= self.r + EPS * (1.0 + self.r)
    }
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Smallest circle containing every point (incremental Welzl).
/// Returns `None` for an empty point set.
///
/// Boundary chains arrive in walking order, which is the slow case for the
/// incremental algorithm; a seeded shuffle brings it back to expected linear time.
pub fn min_enclosing_circle(points: &[Point<i32>]) -> Option<Circle> {
    let mut pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
    pts.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
    let first = *pts.first()?;

    let mut disk = Disk::point(first);
    for i in 1..pts.len() {
        if disk.contains(pts[i]) {
            continue;
        }
        disk = Disk::point(pts[i]);
        for j in 0..i {
            if disk.contains(pts[j]) {
                continue;
            }
            disk = Disk::diameter(pts[i], pts[j]);
            for k in 0..j {
                if !disk.contains(pts[k]) {
                    disk = Disk::through(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    Some(Circle {
        center: (disk.x as f32, disk.y as f32),
        radius: disk.r as f32,
    })
}

/// Fit the enclosing circle of a region and decide whether it is the ball.
/// The reported center is kept inside a `width`×`height` frame.
pub fn classify(region: &Region, min_radius: f32, (width, height): (u32, u32)) -> Detection {
    let Some(circle) = min_enclosing_circle(&region.points) else {
        return Detection::NoRegion;
    };

    if circle.radius >= min_radius {
        let max_x = width.saturating_sub(1) as f32;
        let max_y = height.saturating_sub(1) as f32;
        Detection::Valid {
            center: (circle.center.0.clamp(0.0, max_x), circle.center.1.clamp(0.0, max_y)),
            radius: circle.radius,
        }
    } else {
        Detection::Noise { radius: circle.radius }
    }
}
