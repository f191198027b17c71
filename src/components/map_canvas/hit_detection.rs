use crate::constants::{LABEL_HOVER_RADIUS, SEGMENT_HIT_TOLERANCE, STATION_HIT_RADIUS, VERTEX_HIT_RADIUS};
use crate::geometry::{distance, point_to_line_segment_distance};
use crate::models::{Dataset, LineKey, StationId, Vertex};
use super::staging::{StagingBuffer, VertexRef};
use super::viewport::Viewport;

/// What sits under the pointer. Stations shadow lines.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Station(StationId),
    Line(LineKey),
}

/// A polyline segment inside a staging buffer: the branch and the index of
/// its start vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRef {
    pub branch: String,
    pub start: usize,
}

/// Hit-test a screen point against the dataset.
///
/// Stations are checked first in dataset order, then every branch segment in
/// category -> line -> branch -> segment order. The first match wins.
#[must_use]
pub fn hit_test(dataset: &Dataset, viewport: &Viewport, screen: (f64, f64)) -> Option<HitTarget> {
    if let Some(id) = find_station_at_position(dataset, viewport, screen) {
        return Some(HitTarget::Station(id));
    }
    find_line_at_position(dataset, viewport, screen).map(HitTarget::Line)
}

#[must_use]
pub fn find_station_at_position(dataset: &Dataset, viewport: &Viewport, screen: (f64, f64)) -> Option<StationId> {
    dataset
        .stations
        .iter()
        .find(|s| distance(viewport.world_to_screen(s.position()), screen) < STATION_HIT_RADIUS)
        .map(|s| s.id)
}

#[must_use]
pub fn find_line_at_position(dataset: &Dataset, viewport: &Viewport, screen: (f64, f64)) -> Option<LineKey> {
    dataset
        .iter_lines()
        .find(|(_, line)| {
            line.branches
                .values()
                .any(|branch| find_segment_in_polyline(&branch.vertices, viewport, screen).is_some())
        })
        .map(|(key, _)| key)
}

/// Index of the first segment of `vertices` passing within the line tolerance.
fn find_segment_in_polyline(vertices: &[Vertex], viewport: &Viewport, screen: (f64, f64)) -> Option<usize> {
    vertices.windows(2).position(|pair| {
        let start = viewport.world_to_screen(pair[0]);
        let end = viewport.world_to_screen(pair[1]);
        point_to_line_segment_distance(screen, start, end) < SEGMENT_HIT_TOLERANCE
    })
}

/// First staged vertex within the vertex handle radius.
#[must_use]
pub fn find_vertex_at_position(staging: &StagingBuffer, viewport: &Viewport, screen: (f64, f64)) -> Option<VertexRef> {
    staging.branches().find_map(|(branch, vertices)| {
        vertices
            .iter()
            .position(|v| distance(viewport.world_to_screen(*v), screen) < VERTEX_HIT_RADIUS)
            .map(|index| VertexRef::new(branch, index))
    })
}

/// First staged segment within the line tolerance.
#[must_use]
pub fn find_segment_at_position(staging: &StagingBuffer, viewport: &Viewport, screen: (f64, f64)) -> Option<SegmentRef> {
    staging.branches().find_map(|(branch, vertices)| {
        find_segment_in_polyline(vertices, viewport, screen).map(|start| SegmentRef {
            branch: branch.to_string(),
            start,
        })
    })
}

/// Whether a station is close enough to the pointer to show its label.
#[must_use]
pub fn is_hovering(viewport: &Viewport, position: (f64, f64), pointer: Option<(f64, f64)>) -> bool {
    pointer.is_some_and(|p| distance(viewport.world_to_screen(position), p) < LABEL_HOVER_RADIUS)
}
