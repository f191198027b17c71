use leptos::SignalGetUntracked;
use crate::components::editor_state::EditorState;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    DeleteVertex,
    Save,
}

/// Map a key press to an editor action. `Delete` only means something while
/// a path is being edited.
#[must_use]
pub fn shortcut_for(key: &str, command: bool, path_editing: bool) -> Option<ShortcutAction> {
    match (key, command) {
        ("Delete", false) if path_editing => Some(ShortcutAction::DeleteVertex),
        ("s" | "S", true) => Some(ShortcutAction::Save),
        _ => None,
    }
}

/// Whether a key press inside a text field submits it. Enter that confirms
/// an IME composition does not.
#[must_use]
pub fn submits_field(key: &str, composing: bool) -> bool {
    key == "Enter" && !composing
}

/// Setup window-level keyboard shortcuts
pub fn setup_editor_shortcuts(state: EditorState) {
    leptos::leptos_dom::helpers::window_event_listener(leptos::ev::keydown, move |ev| {
        // Don't handle keyboard shortcuts when typing in input fields
        let Some(target) = ev.target() else { return };
        let Ok(element) = target.dyn_into::<web_sys::HtmlElement>() else { return };
        let tag_name = element.tag_name().to_lowercase();
        if tag_name == "input" || tag_name == "textarea" || tag_name == "select" {
            return;
        }

        if ev.repeat() {
            return;
        }

        let command = ev.ctrl_key() || ev.meta_key();
        match shortcut_for(&ev.key(), command, state.path_editing.get_untracked()) {
            Some(ShortcutAction::DeleteVertex) => {
                ev.prevent_default();
                state.delete_selected_vertex();
            }
            Some(ShortcutAction::Save) => {
                ev.prevent_default();
                state.save_dataset();
            }
            None => {}
        }
    });
}

/// Accept a dataset file dropped anywhere on the window. Only the first file counts.
pub fn setup_file_drop(state: EditorState) {
    leptos::leptos_dom::helpers::window_event_listener(leptos::ev::dragover, |ev| {
        ev.prevent_default();
    });

    leptos::leptos_dom::helpers::window_event_listener(leptos::ev::drop, move |ev| {
        ev.prevent_default();
        let Some(file) = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        state.open_file(&file);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_needs_path_editing() {
        assert_eq!(shortcut_for("Delete", false, true), Some(ShortcutAction::DeleteVertex));
        assert_eq!(shortcut_for("Delete", false, false), None);
        assert_eq!(shortcut_for("Backspace", false, true), None);
    }

    #[test]
    fn test_save_needs_modifier() {
        assert_eq!(shortcut_for("s", true, false), Some(ShortcutAction::Save));
        assert_eq!(shortcut_for("S", true, true), Some(ShortcutAction::Save));
        assert_eq!(shortcut_for("s", false, false), None);
    }

    #[test]
    fn test_enter_submits_field_unless_composing() {
        assert!(submits_field("Enter", false));
        assert!(!submits_field("Enter", true));
        assert!(!submits_field("Tab", false));
    }
}
