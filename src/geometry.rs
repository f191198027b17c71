/// Rounds a coordinate to two decimal places.
///
/// Every position written into the dataset goes through this, so values that
/// were already rounded come back unchanged.
///
/// # Examples
/// ```
/// use highway_editor::geometry::round_to_hundredths;
///
/// assert_eq!(round_to_hundredths(3.456), 3.46);
/// assert_eq!(round_to_hundredths(3.46), 3.46);
/// ```
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds both components of a point to two decimal places.
#[must_use]
pub fn round_point(point: (f64, f64)) -> (f64, f64) {
    (round_to_hundredths(point.0), round_to_hundredths(point.1))
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Calculates the minimum distance from a point to a line segment.
///
/// A zero-length segment degrades to the distance to its start point.
///
/// # Arguments
/// * `point` - The point to measure from
/// * `seg_start` - Starting point of the line segment
/// * `seg_end` - Ending point of the line segment
#[must_use]
pub fn point_to_line_segment_distance(point: (f64, f64), seg_start: (f64, f64), seg_end: (f64, f64)) -> f64 {
    match project_onto_segment(point, seg_start, seg_end) {
        Some(closest) => distance(point, closest),
        None => distance(point, seg_start),
    }
}

/// Projects a point onto a line segment, clamping to the segment's endpoints.
///
/// Returns `None` for a zero-length segment, where no direction exists to
/// project along.
#[must_use]
pub fn project_onto_segment(point: (f64, f64), seg_start: (f64, f64), seg_end: (f64, f64)) -> Option<(f64, f64)> {
    let dx = seg_end.0 - seg_start.0;
    let dz = seg_end.1 - seg_start.1;
    let len_sq = dx * dx + dz * dz;

    if len_sq == 0.0 {
        return None;
    }

    let t = ((point.0 - seg_start.0) * dx + (point.1 - seg_start.1) * dz) / len_sq;
    let t = t.clamp(0.0, 1.0);

    Some((seg_start.0 + t * dx, seg_start.1 + t * dz))
}
