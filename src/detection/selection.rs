use crate::models::Region;

/// Index of the region with the largest enclosed area.
///
/// A region replaces the current pick only when its area is strictly greater,
/// so equal areas resolve to the earliest region. Regions with zero area are
/// never picked.
pub fn select_dominant(regions: &[Region]) -> Option<usize> {
    let mut best = None;
    let mut max_area = 0.0;

    for (idx, region) in regions.iter().enumerate() {
        let area = region.area();
        if area > max_area {
            max_area = area;
            best = Some(idx);
        }
    }

    best
}
