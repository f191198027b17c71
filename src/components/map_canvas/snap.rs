use crate::geometry::{distance, round_point};
use crate::models::Vertex;

/// Snap a dragged vertex onto a right-angle corner relative to its neighbors.
///
/// With both neighbors the two candidate corners are `(prev.x, next.z)` and
/// `(next.x, prev.z)`; the closer one wins and ties go to the second. With a
/// single neighbor only the axis with the smaller delta locks to it.
#[must_use]
pub fn snap_to_orthogonal(raw: Vertex, prev: Option<Vertex>, next: Option<Vertex>) -> Vertex {
    match (prev, next) {
        (Some(prev), Some(next)) => {
            let corner_a = (prev.0, next.1);
            let corner_b = (next.0, prev.1);
            if distance(raw, corner_a) < distance(raw, corner_b) {
                corner_a
            } else {
                corner_b
            }
        }
        (Some(neighbor), None) | (None, Some(neighbor)) => snap_axis_to(raw, neighbor),
        (None, None) => raw,
    }
}

fn snap_axis_to(raw: Vertex, neighbor: Vertex) -> Vertex {
    if (neighbor.0 - raw.0).abs() < (neighbor.1 - raw.1).abs() {
        (neighbor.0, raw.1)
    } else {
        (raw.0, neighbor.1)
    }
}

/// Final resting position of a dragged vertex, always rounded to hundredths.
#[must_use]
pub fn resolve_drag_position(raw: Vertex, neighbors: (Option<Vertex>, Option<Vertex>), snap_enabled: bool) -> Vertex {
    let target = if snap_enabled {
        snap_to_orthogonal(raw, neighbors.0, neighbors.1)
    } else {
        raw
    };
    round_point(target)
}
