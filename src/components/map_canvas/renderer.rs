use crate::constants::{CANVAS_BACKGROUND_COLOR, UNRELATED_ALPHA};
use crate::models::{Dataset, LineKey, Station, StationId, Vertex};
use super::engine::MapEngine;
use super::hit_detection::is_hovering;
use super::selection::Selection;
use super::{line_renderer, station_renderer};
use web_sys::CanvasRenderingContext2d;

/// What the current selection puts in focus. Everything outside the focus is
/// drawn faded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus<'a> {
    Everything,
    Station(&'a Station),
    Line(&'a LineKey),
}

impl<'a> Focus<'a> {
    #[must_use]
    pub fn new(selection: &'a Selection, dataset: &'a Dataset) -> Self {
        match selection {
            Selection::None => Focus::Everything,
            Selection::Station(id) => dataset.station(*id).map_or(Focus::Everything, Focus::Station),
            Selection::Line(session) => Focus::Line(&session.key),
        }
    }

    /// A selected station relates to the lines it is a member of.
    #[must_use]
    pub fn line_alpha(&self, key: &LineKey) -> f64 {
        let related = match self {
            Focus::Everything => true,
            Focus::Station(station) => station.is_member_of(&key.category, &key.name),
            Focus::Line(selected) => *selected == key,
        };
        if related { 1.0 } else { UNRELATED_ALPHA }
    }

    /// A selected line relates to its member stations.
    #[must_use]
    pub fn station_alpha(&self, station: &Station) -> f64 {
        let related = match self {
            Focus::Everything => true,
            Focus::Station(selected) => selected.id == station.id,
            Focus::Line(key) => station.is_member_of(&key.category, &key.name),
        };
        if related { 1.0 } else { UNRELATED_ALPHA }
    }

    fn selected_station(&self) -> Option<StationId> {
        match self {
            Focus::Station(station) => Some(station.id),
            _ => None,
        }
    }
}

/// Repaint the whole map: roads, the staged selected line and its handles,
/// station icons, then labels.
pub fn draw_map(ctx: &CanvasRenderingContext2d, dataset: &Dataset, engine: &MapEngine) {
    let viewport = engine.viewport();
    let (width, height) = viewport.canvas_size();
    let selection = engine.selection();
    let focus = Focus::new(selection, dataset);
    let session = selection.line_session();

    ctx.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    for (key, line) in dataset.iter_lines() {
        if session.is_some_and(|s| s.key == key) {
            continue;
        }
        let color = line_renderer::css_color(line);
        let branches: Vec<&[Vertex]> = line.branches.values().map(|b| b.vertices.as_slice()).collect();
        line_renderer::draw_road(ctx, viewport, &branches, &color, focus.line_alpha(&key));
    }

    // The selected line goes on top, drawn from its staged copy
    if let Some(session) = session {
        if let Some(line) = dataset.line(&session.key) {
            let color = line_renderer::css_color(line);
            let branches: Vec<&[Vertex]> = session.staging.branches().map(|(_, vertices)| vertices).collect();
            line_renderer::draw_road(ctx, viewport, &branches, &color, 1.0);
        }
        if session.path_editing {
            line_renderer::draw_vertex_handles(ctx, viewport, &session.staging, session.active_vertex.as_ref());
        }
    }

    let size = station_renderer::icon_size(viewport.zoom());
    for station in &dataset.stations {
        let center = viewport.world_to_screen(station.position());
        let icon = station_renderer::StationIcon::from(station.station_type);
        station_renderer::draw_station_icon(ctx, center, icon, size, focus.station_alpha(station));
    }

    let hover = engine.hover_point();
    let selected = focus.selected_station();
    for station in &dataset.stations {
        if selected == Some(station.id) || is_hovering(viewport, station.position(), hover) {
            station_renderer::draw_label(ctx, &station.name, viewport.world_to_screen(station.position()));
        }
    }
}
