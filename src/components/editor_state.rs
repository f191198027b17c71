use leptos::{
    batch, create_signal, store_value, ReadSignal, SignalGetUntracked, SignalSet, SignalUpdate,
    SignalUpdateUntracked, SignalWithUntracked, StoredValue, WriteSignal,
};
use crate::components::map_canvas::{EditorTab, EngineEvent, MapEngine, PointerButton, SelectedItem};
use crate::components::toast::{show_toast, Toast, ToastKind};
use crate::constants::APP_TITLE;
use crate::forms::{parse_position, LineForm, StationForm};
use crate::geometry::round_point;
use crate::models::{Dataset, EditorSettings, LineKey, StationId, Vertex};
use crate::storage::{
    create_export_filename, deserialize_dataset, read_file_as_text, saved_message, serialize_dataset,
    trigger_download,
};

/// Everything the editor panels share. The engine sits in a stored value and
/// pushes its changes into the plain signals through an observer.
#[derive(Clone, Copy)]
pub struct EditorState {
    pub dataset: ReadSignal<Dataset>,
    pub set_dataset: WriteSignal<Dataset>,
    pub engine: StoredValue<MapEngine>,
    pub selected: ReadSignal<SelectedItem>,
    pub set_selected: WriteSignal<SelectedItem>,
    pub vertex: ReadSignal<Option<Vertex>>,
    pub set_vertex: WriteSignal<Option<Vertex>>,
    pub path_editing: ReadSignal<bool>,
    pub set_path_editing: WriteSignal<bool>,
    pub dragged_station: ReadSignal<Option<(StationId, Vertex)>>,
    pub set_dragged_station: WriteSignal<Option<(StationId, Vertex)>>,
    pub active_tab: ReadSignal<EditorTab>,
    pub set_active_tab: WriteSignal<EditorTab>,
    pub settings: ReadSignal<EditorSettings>,
    pub set_settings: WriteSignal<EditorSettings>,
    pub file_name: ReadSignal<Option<String>>,
    pub set_file_name: WriteSignal<Option<String>>,
    pub dirty: ReadSignal<bool>,
    pub set_dirty: WriteSignal<bool>,
    pub redraw: ReadSignal<u64>,
    pub set_redraw: WriteSignal<u64>,
    pub toast: ReadSignal<Toast>,
    pub set_toast: WriteSignal<Toast>,
}

#[must_use]
pub fn create_editor_state() -> EditorState {
    let settings_value = EditorSettings::load();

    let (dataset, set_dataset) = create_signal(Dataset::new());
    let (selected, set_selected) = create_signal(SelectedItem::None);
    let (vertex, set_vertex) = create_signal(None::<Vertex>);
    let (path_editing, set_path_editing) = create_signal(false);
    let (dragged_station, set_dragged_station) = create_signal(None::<(StationId, Vertex)>);
    let (active_tab, set_active_tab) = create_signal(EditorTab::default());
    let (file_name, set_file_name) = create_signal(None::<String>);
    let (dirty, set_dirty) = create_signal(false);
    let (redraw, set_redraw) = create_signal(0_u64);
    let (toast, set_toast) = create_signal(Toast::default());

    let mut engine = MapEngine::new();
    engine.set_orthogonal_snap(settings_value.orthogonal_snap);
    engine.subscribe(move |event| match event {
        EngineEvent::SelectionChanged(item) => set_selected.set(item.clone()),
        EngineEvent::VertexChanged(position) => set_vertex.set(*position),
        EngineEvent::PathEditingChanged(enabled) => set_path_editing.set(*enabled),
        EngineEvent::StationDragged { id, position } => {
            set_dragged_station.set(Some((*id, *position)));
            set_dirty.set(true);
        }
    });

    let (settings, set_settings) = create_signal(settings_value);

    EditorState {
        dataset,
        set_dataset,
        engine: store_value(engine),
        selected,
        set_selected,
        vertex,
        set_vertex,
        path_editing,
        set_path_editing,
        dragged_station,
        set_dragged_station,
        active_tab,
        set_active_tab,
        settings,
        set_settings,
        file_name,
        set_file_name,
        dirty,
        set_dirty,
        redraw,
        set_redraw,
        toast,
        set_toast,
    }
}

/// Document title: the file name, starred while there are unsaved changes.
#[must_use]
pub fn document_title(file_name: Option<&str>, dirty: bool) -> String {
    match (file_name, dirty) {
        (Some(name), true) => format!("{name}* - {APP_TITLE}"),
        (Some(name), false) => format!("{name} - {APP_TITLE}"),
        (None, true) => format!("*{APP_TITLE}"),
        (None, false) => APP_TITLE.to_string(),
    }
}

impl EditorState {
    /// Run `f` against the engine. Observer notifications are batched so no
    /// effect reads the engine while it is still borrowed.
    pub fn with_engine<R>(self, f: impl FnOnce(&mut MapEngine) -> R) -> Option<R> {
        batch(|| self.engine.try_update_value(f))
    }

    /// Run `f` against the engine and the dataset together. The dataset
    /// signal is notified afterwards.
    pub fn with_engine_and_dataset<R>(self, f: impl FnOnce(&mut MapEngine, &mut Dataset) -> R) -> Option<R> {
        batch(|| {
            self.engine
                .try_update_value(|engine| self.set_dataset.try_update(|dataset| f(engine, dataset)))
                .flatten()
        })
    }

    pub fn request_redraw(self) {
        self.set_redraw.update(|n| *n = n.wrapping_add(1));
    }

    pub fn notify(self, message: impl Into<String>) {
        show_toast(self.set_toast, message, ToastKind::Info);
    }

    pub fn notify_error(self, message: impl Into<String>) {
        let message = message.into();
        leptos::logging::warn!("{message}");
        show_toast(self.set_toast, message, ToastKind::Error);
    }

    fn mark_dirty(self) {
        self.set_dirty.set(true);
    }

    // Canvas input

    pub fn pointer_down(self, screen: (f64, f64), button: PointerButton) {
        let needs_redraw = self
            .with_engine(|engine| self.dataset.with_untracked(|dataset| engine.pointer_down(dataset, screen, button)))
            .unwrap_or(false);
        if !needs_redraw {
            return;
        }
        // A canvas pick brings the matching list to the front
        match self.selected.get_untracked() {
            SelectedItem::Station(_) => self.change_tab(EditorTab::Stations),
            SelectedItem::Line(_) => self.change_tab(EditorTab::Lines),
            SelectedItem::None => {}
        }
        self.request_redraw();
    }

    /// Pointer motion can drag a station. The dataset is edited in place
    /// without notifying, so the lists are not rebuilt on every move.
    pub fn pointer_move(self, screen: (f64, f64)) {
        let moved = self
            .with_engine(|engine| {
                let mut changed = false;
                self.set_dataset.update_untracked(|dataset| changed = engine.pointer_move(dataset, screen));
                changed
            })
            .unwrap_or(false);
        if moved {
            self.mark_dirty();
        }
        self.request_redraw();
    }

    pub fn pointer_up(self) {
        self.with_engine(MapEngine::pointer_up);
    }

    pub fn pointer_leave(self) {
        self.with_engine(MapEngine::pointer_leave);
        self.request_redraw();
    }

    pub fn wheel(self, delta_y: f64) {
        if self.with_engine(|engine| engine.wheel(delta_y)).unwrap_or(false) {
            self.request_redraw();
        }
    }

    // Selection

    pub fn select_station(self, id: StationId) {
        self.with_engine(|engine| self.dataset.with_untracked(|dataset| engine.select_station(dataset, id)));
        self.request_redraw();
    }

    pub fn select_line(self, key: &LineKey) {
        self.with_engine(|engine| self.dataset.with_untracked(|dataset| engine.select_line(dataset, key)));
        self.request_redraw();
    }

    pub fn clear_selection(self) {
        self.with_engine(MapEngine::clear_selection);
        self.request_redraw();
    }

    pub fn change_tab(self, tab: EditorTab) {
        self.with_engine(|engine| engine.set_active_tab(tab));
        self.set_active_tab.set(tab);
        self.request_redraw();
    }

    // Files

    pub fn load_dataset(self, text: &str, file_name: String) {
        match deserialize_dataset(text) {
            Ok(dataset) => {
                self.set_dataset.set(dataset);
                self.with_engine(|engine| self.dataset.with_untracked(|dataset| engine.set_data(dataset)));
                self.set_file_name.set(Some(file_name.clone()));
                self.set_dirty.set(false);
                self.notify(format!("Loaded {file_name}"));
                self.request_redraw();
            }
            Err(e) => {
                leptos::logging::error!("{e}");
                self.notify_error(e);
            }
        }
    }

    pub fn open_file(self, file: &web_sys::File) {
        let file_name = file.name();
        let result = read_file_as_text(file, move |text| match text {
            Ok(text) => self.load_dataset(&text, file_name),
            Err(e) => self.notify_error(e),
        });
        if let Err(e) = result {
            self.notify_error(e);
        }
    }

    pub fn save_dataset(self) {
        let filename = create_export_filename(self.file_name.get_untracked().as_deref());
        let result = self
            .dataset
            .with_untracked(serialize_dataset)
            .and_then(|text| trigger_download(&text, &filename, "application/json"));

        match result {
            Ok(()) => {
                self.set_dirty.set(false);
                self.notify(saved_message(&filename, chrono::Local::now()));
            }
            Err(e) => {
                leptos::logging::error!("{e}");
                self.notify_error(e);
            }
        }
    }

    // Stations

    pub fn apply_station(self, id: StationId, form: &StationForm) {
        let mut result = Ok(());
        self.set_dataset.update(|dataset| result = form.apply(dataset, id));
        match result {
            Ok(()) => {
                self.mark_dirty();
                self.request_redraw();
            }
            Err(e) => self.notify_error(e),
        }
    }

    pub fn add_station(self) {
        let position = self
            .engine
            .with_value(|engine| round_point(engine.viewport().offset()));
        let mut added = Err(String::new());
        self.set_dataset.update(|dataset| added = dataset.add_station(position));
        match added {
            Ok(id) => {
                self.mark_dirty();
                self.select_station(id);
            }
            Err(e) => self.notify_error(e),
        }
    }

    pub fn delete_station(self, id: StationId) {
        let mut removed = false;
        self.set_dataset.update(|dataset| removed = dataset.remove_station(id));
        if removed {
            self.mark_dirty();
            self.clear_selection();
        }
    }

    // Lines

    /// Write the line attributes, then the staged path.
    pub fn apply_line(self, key: &LineKey, form: &LineForm) {
        let result = self.with_engine_and_dataset(|engine, dataset| {
            form.apply(dataset, key)?;
            Ok::<_, String>(engine.commit(dataset))
        });
        match result {
            Some(Ok(_)) => {
                self.mark_dirty();
                self.request_redraw();
            }
            Some(Err(e)) => self.notify_error(e),
            None => {}
        }
    }

    /// Register a new line and select it. Returns false if the key was rejected.
    pub fn add_line(self, key: &LineKey) -> bool {
        let mut result = Ok(());
        self.set_dataset.update(|dataset| result = dataset.add_line(key));
        match result {
            Ok(()) => {
                self.mark_dirty();
                self.select_line(key);
                true
            }
            Err(e) => {
                self.notify_error(e);
                false
            }
        }
    }

    pub fn delete_line(self, key: &LineKey) {
        let mut removed = false;
        self.set_dataset.update(|dataset| removed = dataset.remove_line(key));
        if removed {
            self.mark_dirty();
            self.clear_selection();
        }
    }

    // Path tools

    pub fn toggle_path_editing(self, enabled: bool) {
        if self.with_engine(|engine| engine.set_path_editing(enabled)) == Some(true) {
            self.request_redraw();
        }
    }

    pub fn set_orthogonal_snap(self, enabled: bool) {
        self.with_engine(|engine| engine.set_orthogonal_snap(enabled));
        self.set_settings.update(|settings| settings.orthogonal_snap = enabled);
        if let Err(e) = self.settings.with_untracked(EditorSettings::save) {
            leptos::logging::warn!("{e}");
        }
    }

    pub fn revert_path(self) {
        self.with_engine(|engine| self.dataset.with_untracked(|dataset| engine.revert(dataset)));
        self.request_redraw();
    }

    pub fn move_selected_vertex(self, x: &str, z: &str) {
        let position = match parse_position(x, z) {
            Ok(position) => position,
            Err(e) => {
                self.notify_error(e);
                return;
            }
        };
        if self.with_engine(|engine| engine.update_selected_vertex(position)) == Some(true) {
            self.request_redraw();
        } else {
            self.notify_error("No vertex selected");
        }
    }

    /// Remove the active vertex. A branch already at two vertices stays as it is.
    pub fn delete_selected_vertex(self) {
        if self.with_engine(MapEngine::delete_selected_vertex).is_some() {
            self.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title() {
        assert_eq!(document_title(None, false), "Ice Highway Editor");
        assert_eq!(document_title(Some("highways.json"), false), "highways.json - Ice Highway Editor");
        assert_eq!(document_title(Some("highways.json"), true), "highways.json* - Ice Highway Editor");
        assert_eq!(document_title(None, true), "*Ice Highway Editor");
    }
}
