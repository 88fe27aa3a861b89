use image::imageops;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use crate::models::{Mask, Region};

/// Find the outer boundaries of the foreground components in a binary mask.
/// Holes and components nested inside holes are not reported.
pub fn find_regions(mask: &Mask) -> Vec<Region> {
    // The border follower only starts an outer border after a background pixel,
    // so components touching the left/top edge need a background frame around them
    let (width, height) = mask.dimensions();
    let mut padded = Mask::new(width + 2, height + 2);
    imageops::replace(&mut padded, mask, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            let points: Vec<Point<i32>> = c.points.iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect();
            Region::new(compress_chain(&points))
        })
        .collect()
}

/// Keep only the points where a closed boundary changes direction
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: Point<i32>, to: Point<i32>| ((to.x - from.x).signum(), (to.y - from.y).signum());

    let corners: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if corners.is_empty() {
        points[..1].to_vec()
    } else {
        corners
    }
}
