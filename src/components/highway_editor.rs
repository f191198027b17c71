use leptos::{component, create_node_ref, view, IntoView, Show, SignalGet};
use crate::components::editor_state::EditorState;
use crate::components::line_editor::LineEditor;
use crate::components::map_canvas::EditorTab;
use crate::components::map_view::MapView;
use crate::components::shortcuts::{setup_editor_shortcuts, setup_file_drop};
use crate::components::sidebar::Sidebar;
use crate::components::station_editor::StationEditor;
use crate::components::toast::ToastNotification;

#[component]
fn MenuBar(state: EditorState) -> impl IntoView {
    let file_input_ref = create_node_ref::<leptos::html::Input>();

    let handle_file_change = move |_| {
        let Some(input) = file_input_ref.get() else { return };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
        state.open_file(&file);
        // Allow picking the same file again
        input.set_value("");
    };

    view! {
        <div class="menu-bar">
            <input
                type="file"
                accept=".json,application/json"
                class="hidden-file-input"
                node_ref=file_input_ref
                on:change=handle_file_change
            />
            <button
                on:click=move |_| {
                    if let Some(input) = file_input_ref.get() {
                        input.click();
                    }
                }
            >
                "Open..."
            </button>
            <button class="save-button" on:click=move |_| state.save_dataset()>
                "Save JSON File"
            </button>
            <span class="menu-file-name">
                {move || state.file_name.get().unwrap_or_default()}
            </span>
        </div>
    }
}

#[component]
#[must_use]
pub fn HighwayEditor(state: EditorState) -> impl IntoView {
    setup_editor_shortcuts(state);
    setup_file_drop(state);

    view! {
        <div class="highway-editor">
            <MenuBar state=state/>
            <div class="editor-layout">
                <Sidebar state=state/>
                <MapView state=state/>
                <div class="editor-panel">
                    <Show
                        when=move || state.active_tab.get() == EditorTab::Stations
                        fallback=move || view! { <LineEditor state=state/> }
                    >
                        <StationEditor state=state/>
                    </Show>
                </div>
            </div>
            <ToastNotification toast=state.toast/>
        </div>
    }
}
