//! Gesture dispatch for the map canvas.
//!
//! [`MapEngine`] owns the viewport, the selection and the staged path edits.
//! It never owns the dataset: every call that needs it borrows it from the
//! caller, and only station drags and [`MapEngine::commit`] write to it.

use crate::geometry::{project_onto_segment, round_point};
use crate::logging::log;
use crate::models::{Dataset, LineKey, StationId, Vertex};
use super::events::{EngineEvent, Observers, SelectedItem};
use super::hit_detection::{find_segment_at_position, find_vertex_at_position, hit_test, HitTarget};
use super::selection::{EditorMode, EditorTab, LineEditSession, Selection};
use super::snap::resolve_drag_position;
use super::staging::{StagingBuffer, VertexRef};
use super::viewport::{Viewport, ZoomDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// Maps `MouseEvent::button()`; middle and extra buttons are ignored.
    #[must_use]
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Primary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// What the held pointer button is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Pan { last: (f64, f64) },
    Station(StationId),
    Vertex,
}

pub struct MapEngine {
    viewport: Viewport,
    selection: Selection,
    gesture: Gesture,
    active_tab: EditorTab,
    orthogonal_snap: bool,
    hover: Option<(f64, f64)>,
    observers: Observers,
}

impl Default for MapEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            selection: Selection::None,
            gesture: Gesture::Idle,
            active_tab: EditorTab::default(),
            orthogonal_snap: true,
            hover: None,
            observers: Observers::default(),
        }
    }

    pub fn subscribe(&mut self, observer: impl Fn(&EngineEvent) + 'static) {
        self.observers.subscribe(observer);
    }

    fn emit(&self, event: EngineEvent) {
        self.observers.emit(&event);
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        EditorMode::derive(&self.selection, self.gesture == Gesture::Vertex)
    }

    #[must_use]
    pub fn hover_point(&self) -> Option<(f64, f64)> {
        self.hover
    }

    #[must_use]
    pub fn active_tab(&self) -> EditorTab {
        self.active_tab
    }

    #[must_use]
    pub fn orthogonal_snap(&self) -> bool {
        self.orthogonal_snap
    }

    pub fn set_orthogonal_snap(&mut self, enabled: bool) {
        self.orthogonal_snap = enabled;
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    /// Start over with a freshly loaded dataset: nothing selected, view
    /// centered on the first station.
    pub fn set_data(&mut self, dataset: &Dataset) {
        self.gesture = Gesture::Idle;
        self.hover = None;
        self.replace_selection(Selection::None);
        if let Some(first) = dataset.stations.first() {
            self.viewport.center_on(first.position());
        }
        log!("Map loaded: {} stations, {} lines", dataset.stations.len(), dataset.line_keys().len());
    }

    /// Swap the selection, notifying observers of everything the old one
    /// took with it. Staged edits of a replaced line are dropped.
    fn replace_selection(&mut self, selection: Selection) {
        let old = std::mem::replace(&mut self.selection, selection);
        self.gesture = Gesture::Idle;
        if old.is_path_editing() {
            self.emit(EngineEvent::PathEditingChanged(false));
        }
        if old.active_vertex().is_some() {
            self.emit(EngineEvent::VertexChanged(None));
        }
        self.emit(EngineEvent::SelectionChanged(SelectedItem::from(&self.selection)));
    }

    /// Select a station and center the view on it. Unknown ids clear the selection.
    /// Re-selecting the current station only recenters.
    pub fn select_station(&mut self, dataset: &Dataset, id: StationId) {
        match dataset.station(id) {
            Some(station) => {
                self.viewport.center_on(station.position());
                if self.selection.station_id() != Some(id) {
                    self.replace_selection(Selection::Station(id));
                }
            }
            None => self.replace_selection(Selection::None),
        }
    }

    /// Select a line, stage a fresh copy of its branches and center the view on
    /// its first vertex. Unknown keys clear the selection. Re-selecting the
    /// current line recenters on its staged path and keeps the staged edits.
    pub fn select_line(&mut self, dataset: &Dataset, key: &LineKey) {
        let Some(line) = dataset.line(key) else {
            self.replace_selection(Selection::None);
            return;
        };
        if let Some(session) = self.selection.line_session().filter(|s| &s.key == key) {
            if let Some(anchor) = session.staging.anchor() {
                self.viewport.center_on(anchor);
            }
            return;
        }
        let staging = StagingBuffer::from_line(line);
        if let Some(anchor) = staging.anchor() {
            self.viewport.center_on(anchor);
        }
        self.replace_selection(Selection::Line(LineEditSession::new(key.clone(), staging)));
    }

    /// Drop the selection along with any uncommitted path edits.
    pub fn clear_selection(&mut self) {
        self.replace_selection(Selection::None);
    }

    /// Turn path editing on or off. Needs a selected line; returns false otherwise.
    /// Turning it off keeps the staged edits but forgets the active vertex.
    pub fn set_path_editing(&mut self, enabled: bool) -> bool {
        let Some(session) = self.selection.line_session_mut() else {
            return false;
        };
        if session.path_editing == enabled {
            return true;
        }
        session.path_editing = enabled;
        let had_vertex = !enabled && session.active_vertex.take().is_some();
        log!("Path editing {} for {}", if enabled { "on" } else { "off" }, session.key);

        if self.gesture == Gesture::Vertex {
            self.gesture = Gesture::Idle;
        }
        if had_vertex {
            self.emit(EngineEvent::VertexChanged(None));
        }
        self.emit(EngineEvent::PathEditingChanged(enabled));
        true
    }

    /// Bring a sidebar tab to the front. Leaving the lines tab ends path editing.
    pub fn set_active_tab(&mut self, tab: EditorTab) {
        if self.active_tab == tab {
            return;
        }
        self.active_tab = tab;
        if matches!(self.gesture, Gesture::Station(_)) {
            self.gesture = Gesture::Idle;
        }
        if self.selection.is_path_editing() {
            self.set_path_editing(false);
        }
    }

    /// Handle a pointer press. Returns true when the scene needs a redraw.
    pub fn pointer_down(&mut self, dataset: &Dataset, screen: (f64, f64), button: PointerButton) -> bool {
        self.gesture = Gesture::Idle;

        if self.selection.is_path_editing() {
            return match button {
                PointerButton::Primary => self.grab_vertex(screen),
                PointerButton::Secondary => self.insert_vertex_at(screen),
            };
        }
        if button != PointerButton::Primary {
            return false;
        }

        match hit_test(dataset, &self.viewport, screen) {
            Some(HitTarget::Station(id))
                if self.selection.station_id() == Some(id) && self.active_tab == EditorTab::Stations =>
            {
                self.gesture = Gesture::Station(id);
                false
            }
            Some(HitTarget::Station(id)) => {
                self.select_station(dataset, id);
                true
            }
            Some(HitTarget::Line(key)) => {
                self.select_line(dataset, &key);
                true
            }
            None => {
                self.gesture = Gesture::Pan { last: screen };
                false
            }
        }
    }

    /// Handle pointer motion. Returns true when the dataset was modified.
    pub fn pointer_move(&mut self, dataset: &mut Dataset, screen: (f64, f64)) -> bool {
        self.hover = Some(screen);
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Pan { last } => {
                self.viewport.pan_by_screen(screen.0 - last.0, screen.1 - last.1);
                self.gesture = Gesture::Pan { last: screen };
                false
            }
            Gesture::Station(id) => self.drag_station(dataset, id, screen),
            Gesture::Vertex => {
                self.drag_vertex(screen);
                false
            }
        }
    }

    /// Releasing the button always ends the gesture.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
        self.gesture = Gesture::Idle;
    }

    /// One wheel notch. Returns false when the zoom step was rejected.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        self.viewport.zoom_step(ZoomDirection::from_wheel_delta(delta_y))
    }

    fn drag_station(&mut self, dataset: &mut Dataset, id: StationId, screen: (f64, f64)) -> bool {
        let position = round_point(self.viewport.screen_to_world(screen));
        let Some(station) = dataset.station_mut(id) else {
            self.gesture = Gesture::Idle;
            return false;
        };
        station.x = position.0;
        station.z = position.1;
        self.emit(EngineEvent::StationDragged { id, position });
        true
    }

    fn grab_vertex(&mut self, screen: (f64, f64)) -> bool {
        let Some(session) = self.selection.path_session_mut() else {
            return false;
        };
        let Some(hit) = find_vertex_at_position(&session.staging, &self.viewport, screen) else {
            return false;
        };
        let position = session.staging.vertex(&hit);
        session.active_vertex = Some(hit);
        self.gesture = Gesture::Vertex;
        self.emit(EngineEvent::VertexChanged(position));
        true
    }

    fn drag_vertex(&mut self, screen: (f64, f64)) {
        let raw = self.viewport.screen_to_world(screen);
        let snap = self.orthogonal_snap;
        let Some(session) = self.selection.path_session_mut() else {
            return;
        };
        let Some(active) = session.active_vertex.clone() else {
            return;
        };
        let position = resolve_drag_position(raw, session.staging.neighbors(&active), snap);
        if session.staging.set_vertex(&active, position) {
            self.emit(EngineEvent::VertexChanged(Some(position)));
        }
    }

    /// Insert a vertex on the staged segment under the pointer, at the
    /// pointer's projection onto it.
    fn insert_vertex_at(&mut self, screen: (f64, f64)) -> bool {
        let world = self.viewport.screen_to_world(screen);
        let Some(session) = self.selection.path_session_mut() else {
            return false;
        };
        let staging = &mut session.staging;

        if let Some(active) = &session.active_vertex {
            if find_vertex_at_position(staging, &self.viewport, screen).as_ref() == Some(active) {
                return false;
            }
        }
        let Some(segment) = find_segment_at_position(staging, &self.viewport, screen) else {
            return false;
        };
        let endpoints = staging
            .branch(&segment.branch)
            .and_then(|vertices| Some((*vertices.get(segment.start)?, *vertices.get(segment.start + 1)?)));
        let Some((start, end)) = endpoints else {
            return false;
        };
        let Some(projected) = project_onto_segment(world, start, end) else {
            return false;
        };

        let after = VertexRef::new(segment.branch.as_str(), segment.start);
        if staging.insert_after(&after, round_point(projected)).is_none() {
            return false;
        }
        if let Some(active) = session.active_vertex.as_mut() {
            if active.branch == segment.branch && active.index > segment.start {
                active.index += 1;
            }
        }
        log!("Inserted vertex in {} / {} after index {}", session.key, segment.branch, segment.start);
        true
    }

    /// Remove the active vertex unless its branch is down to two vertices.
    /// The vertex is deselected either way.
    pub fn delete_selected_vertex(&mut self) -> bool {
        let Some(session) = self.selection.path_session_mut() else {
            return false;
        };
        let Some(active) = session.active_vertex.take() else {
            return false;
        };
        let removed = session.staging.remove(&active);
        if removed {
            log!("Deleted vertex {} of {} / {}", active.index, session.key, active.branch);
        }
        if self.gesture == Gesture::Vertex {
            self.gesture = Gesture::Idle;
        }
        self.emit(EngineEvent::VertexChanged(None));
        removed
    }

    /// Move the active vertex to an exact position, as typed into the vertex fields.
    pub fn update_selected_vertex(&mut self, position: Vertex) -> bool {
        let position = round_point(position);
        let Some(session) = self.selection.path_session_mut() else {
            return false;
        };
        let Some(active) = session.active_vertex.clone() else {
            return false;
        };
        if !session.staging.set_vertex(&active, position) {
            return false;
        }
        self.emit(EngineEvent::VertexChanged(Some(position)));
        true
    }

    #[must_use]
    pub fn selected_vertex_position(&self) -> Option<Vertex> {
        let session = self.selection.line_session()?;
        session.staging.vertex(session.active_vertex.as_ref()?)
    }

    /// Write the staged polylines of the selected line back into the dataset.
    /// Returns the number of branches written.
    pub fn commit(&self, dataset: &mut Dataset) -> usize {
        let Some(session) = self.selection.line_session() else {
            return 0;
        };
        let Some(line) = dataset.line_mut(&session.key) else {
            return 0;
        };
        let written = session.staging.commit_into(line);
        log!("Committed {} branches of {}", written, session.key);
        written
    }

    /// Throw away staged edits and restage the selected line from the dataset.
    pub fn revert(&mut self, dataset: &Dataset) -> bool {
        let Some(session) = self.selection.line_session_mut() else {
            return false;
        };
        let Some(line) = dataset.line(&session.key) else {
            return false;
        };
        session.staging = StagingBuffer::from_line(line);
        let had_vertex = session.active_vertex.take().is_some();
        log!("Reverted staged path of {}", session.key);

        if self.gesture == Gesture::Vertex {
            self.gesture = Gesture::Idle;
        }
        if had_vertex {
            self.emit(EngineEvent::VertexChanged(None));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Station;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MAIN: &str = "Main line";

    fn red() -> LineKey {
        LineKey::new("Nether", "Red")
    }

    /// One station at (100, 200) and a two-vertex line from (0, 0) to (200, 0).
    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.stations.push(Station::new(1, "Spawn".to_string(), (100.0, 200.0)));
        dataset.add_line(&red()).expect("add line");
        dataset
            .line_mut(&red())
            .expect("line")
            .branch_mut_or_create(MAIN)
            .vertices = vec![(0.0, 0.0), (200.0, 0.0)];
        dataset
    }

    /// Engine on an 800x600 canvas at zoom 1 with snapping off.
    fn engine(dataset: &Dataset) -> MapEngine {
        let mut engine = MapEngine::new();
        engine.set_canvas_size(800.0, 600.0);
        assert!(engine.viewport_mut().set_zoom(1.0));
        engine.set_orthogonal_snap(false);
        engine.set_data(dataset);
        engine
    }

    fn record(engine: &mut MapEngine) -> Rc<RefCell<Vec<EngineEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    fn staged(engine: &MapEngine) -> Vec<Vertex> {
        engine
            .selection()
            .line_session()
            .and_then(|s| s.staging.branch(MAIN))
            .expect("staged branch")
            .to_vec()
    }

    fn to_screen(engine: &MapEngine, world: Vertex) -> (f64, f64) {
        engine.viewport().world_to_screen(world)
    }

    #[test]
    fn test_end_to_end_vertex_drag_commit_and_revert() {
        let mut data = dataset();
        let mut engine = engine(&data);

        engine.select_line(&data, &red());
        assert!(engine.set_path_editing(true));

        // Drag, then revert before committing
        let origin = to_screen(&engine, (0.0, 0.0));
        assert!(engine.pointer_down(&data, origin, PointerButton::Primary));
        assert_eq!(engine.mode(), EditorMode::VertexDragging);
        let target = to_screen(&engine, (3.456, 3.444));
        assert!(!engine.pointer_move(&mut data, target));
        engine.pointer_up();
        assert_eq!(engine.mode(), EditorMode::VertexSelected);
        assert_eq!(staged(&engine), vec![(3.46, 3.44), (200.0, 0.0)]);
        assert_eq!(data.line(&red()).expect("line").branches[MAIN].vertices, vec![(0.0, 0.0), (200.0, 0.0)]);

        assert!(engine.revert(&data));
        assert_eq!(staged(&engine), vec![(0.0, 0.0), (200.0, 0.0)]);
        assert_eq!(engine.mode(), EditorMode::PathEditing);

        // Drag again and commit
        assert!(engine.pointer_down(&data, origin, PointerButton::Primary));
        engine.pointer_move(&mut data, target);
        engine.pointer_up();
        assert_eq!(engine.commit(&mut data), 1);
        assert_eq!(data.line(&red()).expect("line").branches[MAIN].vertices, vec![(3.46, 3.44), (200.0, 0.0)]);
    }

    #[test]
    fn test_insert_vertex_at_projected_midpoint() {
        let mut data = dataset();
        data.line_mut(&red()).expect("line").branches[MAIN].vertices = vec![(0.0, 0.0), (10.0, 0.0)];
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);

        let click = to_screen(&engine, (5.0, 1.0));
        assert!(engine.pointer_down(&data, click, PointerButton::Secondary));
        assert_eq!(staged(&engine), vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert_eq!(data.line(&red()).expect("line").branches[MAIN].vertices.len(), 2);
    }

    #[test]
    fn test_right_click_on_selected_vertex_is_noop() {
        let data = dataset();
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);

        let origin = to_screen(&engine, (0.0, 0.0));
        engine.pointer_down(&data, origin, PointerButton::Primary);
        engine.pointer_up();
        assert!(!engine.pointer_down(&data, origin, PointerButton::Secondary));
        assert_eq!(staged(&engine).len(), 2);
    }

    #[test]
    fn test_insert_before_active_vertex_shifts_its_index() {
        let data = dataset();
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);

        let end = to_screen(&engine, (200.0, 0.0));
        engine.pointer_down(&data, end, PointerButton::Primary);
        engine.pointer_up();
        assert_eq!(engine.selection().active_vertex(), Some(&VertexRef::new(MAIN, 1)));

        assert!(engine.pointer_down(&data, to_screen(&engine, (100.0, 2.0)), PointerButton::Secondary));
        assert_eq!(engine.selection().active_vertex(), Some(&VertexRef::new(MAIN, 2)));
        assert_eq!(engine.selected_vertex_position(), Some((200.0, 0.0)));
    }

    #[test]
    fn test_delete_respects_branch_floor() {
        let mut data = dataset();
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);

        engine.pointer_down(&data, to_screen(&engine, (0.0, 0.0)), PointerButton::Primary);
        engine.pointer_up();
        assert!(!engine.delete_selected_vertex());
        assert_eq!(staged(&engine).len(), 2);
        assert_eq!(engine.mode(), EditorMode::PathEditing);

        engine.pointer_down(&data, to_screen(&engine, (100.0, 1.0)), PointerButton::Secondary);
        engine.pointer_down(&data, to_screen(&engine, (100.0, 0.0)), PointerButton::Primary);
        engine.pointer_up();
        assert!(engine.delete_selected_vertex());
        assert_eq!(staged(&engine), vec![(0.0, 0.0), (200.0, 0.0)]);

        engine.commit(&mut data);
        assert_eq!(data.line(&red()).expect("line").branches[MAIN].vertices, vec![(0.0, 0.0), (200.0, 0.0)]);
    }

    #[test]
    fn test_floor_delete_only_releases_vertex() {
        let data = dataset();
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);
        engine.pointer_down(&data, to_screen(&engine, (200.0, 0.0)), PointerButton::Primary);
        engine.pointer_up();
        let events = record(&mut engine);

        assert!(!engine.delete_selected_vertex());
        assert_eq!(*events.borrow(), vec![EngineEvent::VertexChanged(None)]);
        assert_eq!(staged(&engine), vec![(0.0, 0.0), (200.0, 0.0)]);
        assert!(engine.selection().is_path_editing());
    }

    #[test]
    fn test_orthogonal_snap_while_dragging() {
        let mut data = dataset();
        data.line_mut(&red()).expect("line").branches[MAIN].vertices = vec![(0.0, 0.0), (50.0, 50.0), (100.0, 100.0)];
        let mut engine = engine(&data);
        engine.set_orthogonal_snap(true);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);

        engine.pointer_down(&data, to_screen(&engine, (50.0, 50.0)), PointerButton::Primary);
        engine.pointer_move(&mut data, to_screen(&engine, (10.0, 90.0)));
        engine.pointer_up();
        assert_eq!(staged(&engine), vec![(0.0, 0.0), (0.0, 100.0), (100.0, 100.0)]);
    }

    #[test]
    fn test_click_selects_station_before_line() {
        let mut data = dataset();
        data.stations.push(Station::new(2, "Midway".to_string(), (50.0, 0.0)));
        let mut engine = engine(&data);

        assert!(engine.pointer_down(&data, to_screen(&engine, (50.0, 0.0)), PointerButton::Primary));
        assert_eq!(engine.selection(), &Selection::Station(2));
        assert_eq!(engine.viewport().offset(), (50.0, 0.0));

        assert!(engine.pointer_down(&data, to_screen(&engine, (150.0, 1.0)), PointerButton::Primary));
        assert_eq!(engine.selection().line_key(), Some(&red()));
        assert_eq!(engine.mode(), EditorMode::LineSelected);
        assert_eq!(engine.viewport().offset(), (0.0, 0.0));
    }

    #[test]
    fn test_empty_space_pans_outside_path_editing_only() {
        let mut data = dataset();
        let mut engine = engine(&data);
        let start = engine.viewport().offset();

        assert!(!engine.pointer_down(&data, (10.0, 10.0), PointerButton::Primary));
        engine.pointer_move(&mut data, (30.0, 20.0));
        engine.pointer_up();
        assert_eq!(engine.viewport().offset(), (start.0 - 20.0, start.1 - 10.0));

        engine.select_line(&data, &red());
        engine.set_path_editing(true);
        let centered = engine.viewport().offset();
        assert!(!engine.pointer_down(&data, (10.0, 10.0), PointerButton::Primary));
        engine.pointer_move(&mut data, (30.0, 20.0));
        assert_eq!(engine.viewport().offset(), centered);
        assert_eq!(engine.mode(), EditorMode::PathEditing);
    }

    #[test]
    fn test_station_drag_requires_selection_and_stations_tab() {
        let mut data = dataset();
        let mut engine = engine(&data);
        let events = record(&mut engine);

        engine.select_station(&data, 1);
        let at = to_screen(&engine, (100.0, 200.0));
        engine.pointer_down(&data, at, PointerButton::Primary);
        assert!(engine.pointer_move(&mut data, to_screen(&engine, (110.123, 190.456))));
        engine.pointer_up();

        assert_eq!(data.station(1).expect("station").position(), (110.12, 190.46));
        assert!(events.borrow().contains(&EngineEvent::StationDragged {
            id: 1,
            position: (110.12, 190.46),
        }));

        engine.set_active_tab(EditorTab::Lines);
        let at = to_screen(&engine, (110.12, 190.46));
        engine.pointer_down(&data, at, PointerButton::Primary);
        assert!(!engine.pointer_move(&mut data, to_screen(&engine, (0.0, 0.0))));
        assert_eq!(data.station(1).expect("station").position(), (110.12, 190.46));
    }

    #[test]
    fn test_path_editing_requires_line_selection() {
        let data = dataset();
        let mut engine = engine(&data);
        assert!(!engine.set_path_editing(true));

        engine.select_station(&data, 1);
        assert!(!engine.set_path_editing(true));
        assert_eq!(engine.mode(), EditorMode::StationSelected);
    }

    #[test]
    fn test_toggling_path_editing_off_keeps_staging() {
        let mut data = dataset();
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);
        engine.pointer_down(&data, to_screen(&engine, (0.0, 0.0)), PointerButton::Primary);
        engine.pointer_move(&mut data, to_screen(&engine, (1.0, 1.0)));
        engine.pointer_up();

        assert!(engine.set_path_editing(false));
        assert_eq!(engine.mode(), EditorMode::LineSelected);
        assert_eq!(staged(&engine)[0], (1.0, 1.0));

        engine.set_path_editing(true);
        engine.set_active_tab(EditorTab::Lines);
        engine.set_active_tab(EditorTab::Stations);
        assert_eq!(engine.mode(), EditorMode::LineSelected);
        assert_eq!(staged(&engine)[0], (1.0, 1.0));
    }

    #[test]
    fn test_reselecting_same_line_keeps_staging() {
        let mut data = dataset();
        let mut engine = engine(&data);
        let events = record(&mut engine);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);
        engine.pointer_down(&data, to_screen(&engine, (0.0, 0.0)), PointerButton::Primary);
        engine.pointer_move(&mut data, to_screen(&engine, (0.0, 50.0)));
        engine.pointer_up();
        engine.set_path_editing(false);
        events.borrow_mut().clear();

        assert!(engine.pointer_down(&data, to_screen(&engine, (150.0, 0.0)), PointerButton::Primary));
        engine.pointer_up();
        assert_eq!(engine.selection().line_key(), Some(&red()));
        assert_eq!(staged(&engine), vec![(0.0, 50.0), (200.0, 0.0)]);
        assert_eq!(engine.viewport().offset(), (0.0, 50.0));
        assert!(events.borrow().iter().all(|e| !matches!(e, EngineEvent::SelectionChanged(_))));

        engine.select_line(&data, &red());
        assert_eq!(staged(&engine), vec![(0.0, 50.0), (200.0, 0.0)]);
        assert_eq!(engine.commit(&mut data), 1);
    }

    #[test]
    fn test_reselecting_same_station_keeps_selection() {
        let data = dataset();
        let mut engine = engine(&data);
        engine.select_station(&data, 1);
        let events = record(&mut engine);
        engine.viewport_mut().pan_by_screen(40.0, 40.0);

        engine.select_station(&data, 1);
        assert_eq!(engine.selection(), &Selection::Station(1));
        assert_eq!(engine.viewport().offset(), (100.0, 200.0));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_switching_selection_discards_staged_edits() {
        let mut data = dataset();
        let mut engine = engine(&data);
        engine.select_line(&data, &red());
        engine.set_path_editing(true);
        engine.pointer_down(&data, to_screen(&engine, (0.0, 0.0)), PointerButton::Primary);
        engine.pointer_move(&mut data, to_screen(&engine, (1.0, 1.0)));
        engine.pointer_up();

        engine.select_station(&data, 1);
        engine.select_line(&data, &red());
        assert_eq!(engine.mode(), EditorMode::LineSelected);
        assert_eq!(staged(&engine), vec![(0.0, 0.0), (200.0, 0.0)]);

        engine.clear_selection();
        assert_eq!(engine.mode(), EditorMode::Browsing);
        assert_eq!(engine.commit(&mut data), 0);
    }

    #[test]
    fn test_unknown_keys_select_nothing() {
        let data = dataset();
        let mut engine = engine(&data);
        engine.select_station(&data, 1);

        engine.select_line(&data, &LineKey::new("Nether", "Missing"));
        assert_eq!(engine.selection(), &Selection::None);

        engine.select_station(&data, 42);
        assert_eq!(engine.mode(), EditorMode::Browsing);
    }

    #[test]
    fn test_observers_see_vertex_lifecycle() {
        let mut data = dataset();
        let mut engine = engine(&data);
        let events = record(&mut engine);

        engine.select_line(&data, &red());
        engine.set_path_editing(true);
        engine.pointer_down(&data, to_screen(&engine, (200.0, 0.0)), PointerButton::Primary);
        engine.pointer_move(&mut data, to_screen(&engine, (150.0, 0.0)));
        engine.pointer_up();
        assert!(engine.update_selected_vertex((120.004, -0.006)));
        engine.clear_selection();

        assert_eq!(
            *events.borrow(),
            vec![
                EngineEvent::SelectionChanged(SelectedItem::Line(red())),
                EngineEvent::PathEditingChanged(true),
                EngineEvent::VertexChanged(Some((200.0, 0.0))),
                EngineEvent::VertexChanged(Some((150.0, 0.0))),
                EngineEvent::VertexChanged(Some((120.0, -0.01))),
                EngineEvent::PathEditingChanged(false),
                EngineEvent::VertexChanged(None),
                EngineEvent::SelectionChanged(SelectedItem::None),
            ]
        );
    }

    #[test]
    fn test_set_data_centers_on_first_station() {
        let data = dataset();
        let engine = engine(&data);
        assert_eq!(engine.viewport().offset(), (100.0, 200.0));
        assert_eq!(engine.mode(), EditorMode::Browsing);
    }

    #[test]
    fn test_wheel_zoom() {
        let data = dataset();
        let mut engine = engine(&data);
        assert!(engine.wheel(-1.0));
        assert!((engine.viewport().zoom() - 1.2).abs() < 1e-12);
        assert!(engine.wheel(1.0));
        assert!((engine.viewport().zoom() - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_button_mapping() {
        assert_eq!(PointerButton::from_dom(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_dom(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_dom(1), None);
    }
}
