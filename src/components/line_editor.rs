use leptos::{
    component, create_effect, create_signal, event_target_checked, event_target_value, view, IntoView, Show,
    SignalGet, SignalGetUntracked, SignalSet, SignalUpdate, SignalWith, SignalWithUntracked,
};
use crate::components::confirmation_dialog::ConfirmationDialog;
use crate::components::editor_state::EditorState;
use crate::components::map_canvas::SelectedItem;
use crate::components::shortcuts::submits_field;
use crate::constants::COLOR_PRESETS;
use crate::forms::LineForm;
use crate::models::LineKey;
use std::rc::Rc;

/// Editing tools for the staged polyline of the selected line.
#[component]
fn PathTools(state: EditorState) -> impl IntoView {
    let (vertex_x, set_vertex_x) = create_signal(String::new());
    let (vertex_z, set_vertex_z) = create_signal(String::new());
    let (confirm_revert, set_confirm_revert) = create_signal(false);

    create_effect(move |_| match state.vertex.get() {
        Some((x, z)) => {
            set_vertex_x.set(format!("{x:.2}"));
            set_vertex_z.set(format!("{z:.2}"));
        }
        None => {
            set_vertex_x.set(String::new());
            set_vertex_z.set(String::new());
        }
    });

    let no_vertex = move || state.vertex.get().is_none();
    let move_vertex = move || state.move_selected_vertex(&vertex_x.get_untracked(), &vertex_z.get_untracked());
    let submit_on_enter = move |ev: leptos::ev::KeyboardEvent| {
        if submits_field(&ev.key(), ev.is_composing()) {
            ev.prevent_default();
            move_vertex();
        }
    };

    view! {
        <fieldset class="path-tools">
            <legend>"Path"</legend>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || state.path_editing.get()
                    on:change=move |ev| state.toggle_path_editing(event_target_checked(&ev))
                />
                "Edit Path"
            </label>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || state.settings.with(|s| s.orthogonal_snap)
                    on:change=move |ev| state.set_orthogonal_snap(event_target_checked(&ev))
                />
                "Orthogonal Snap"
            </label>
            <p class="hint">"Drag a vertex to move it, right-click the line to add one, Delete removes the selected one."</p>
            <div class="vertex-fields">
                <label>"Vertex X"</label>
                <input
                    type="text"
                    prop:disabled=no_vertex
                    prop:value=move || vertex_x.get()
                    on:input=move |ev| set_vertex_x.set(event_target_value(&ev))
                    on:keydown=submit_on_enter
                />
                <label>"Vertex Z"</label>
                <input
                    type="text"
                    prop:disabled=no_vertex
                    prop:value=move || vertex_z.get()
                    on:input=move |ev| set_vertex_z.set(event_target_value(&ev))
                    on:keydown=submit_on_enter
                />
                <button
                    prop:disabled=no_vertex
                    on:click=move |_| move_vertex()
                >
                    "Move"
                </button>
            </div>
            <button class="danger" on:click=move |_| set_confirm_revert.set(true)>"Revert Path"</button>
        </fieldset>

        <ConfirmationDialog
            is_open=confirm_revert.into()
            title=leptos::Signal::derive(|| "Revert Path".to_string())
            message=leptos::Signal::derive(|| "Discard all unapplied path edits for this line?".to_string())
            on_confirm=Rc::new(move || {
                set_confirm_revert.set(false);
                state.revert_path();
            })
            on_cancel=Rc::new(move || set_confirm_revert.set(false))
            confirm_text="Revert".to_string()
        />
    }
}

#[component]
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn LineEditor(state: EditorState) -> impl IntoView {
    let (form, set_form) = create_signal(LineForm::default());
    let (line_key, set_line_key) = create_signal(None::<LineKey>);
    let (confirm_delete, set_confirm_delete) = create_signal(false);

    create_effect(move |_| {
        let SelectedItem::Line(key) = state.selected.get() else {
            set_line_key.set(None);
            return;
        };
        let loaded = state.dataset.with_untracked(|d| d.line(&key).map(LineForm::from_line));
        if let Some(loaded) = loaded {
            set_form.set(loaded);
        }
        set_line_key.set(Some(key));
    });

    let handle_apply = move |_| {
        if let Some(key) = line_key.get_untracked() {
            form.with_untracked(|f| state.apply_line(&key, f));
        }
    };

    let text_field = move |label: &'static str, get: fn(&LineForm) -> String, set: fn(&mut LineForm, String)| {
        view! {
            <label>{label}</label>
            <input
                type="text"
                prop:value=move || form.with(get)
                on:input=move |ev| set_form.update(|f| set(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <Show
            when=move || line_key.get().is_some()
            fallback=|| view! { <p class="editor-placeholder">"Select a line to edit it."</p> }
        >
            <div class="line-editor">
                <h3 class="editor-title">{move || line_key.get().map(|k| k.to_string()).unwrap_or_default()}</h3>
                {text_field("Code", |f| f.code.clone(), |f, v| f.code = v)}
                {text_field("Prefix", |f| f.prefix.clone(), |f, v| f.prefix = v)}
                {text_field("Elevation (Y)", |f| f.y.clone(), |f, v| f.y = v)}
                <label>"Color (hex)"</label>
                <div class="color-row">
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.color.clone())
                        on:input=move |ev| set_form.update(|f| f.color = event_target_value(&ev))
                    />
                    <span
                        class="color-preview"
                        style=move || format!("background-color: {};", form.with(LineForm::preview_color))
                    ></span>
                    <input
                        type="color"
                        class="color-picker"
                        title="Color wheel"
                        prop:value=move || form.with(LineForm::preview_color)
                        on:input=move |ev| set_form.update(|f| f.set_color_from_picker(&event_target_value(&ev)))
                    />
                </div>
                <div class="color-presets">
                    {COLOR_PRESETS.into_iter().map(|(hex, label)| view! {
                        <button
                            class="color-preset"
                            title=label
                            style=format!("background-color: #{hex};")
                            on:click=move |_| set_form.update(|f| f.color = hex.to_string())
                        ></button>
                    }).collect::<Vec<_>>()}
                </div>
                <PathTools state=state/>
                <div class="editor-buttons">
                    <button class="primary" on:click=handle_apply>"Apply Changes"</button>
                    <button class="danger" on:click=move |_| set_confirm_delete.set(true)>"Delete Line"</button>
                </div>
            </div>
        </Show>

        <ConfirmationDialog
            is_open=confirm_delete.into()
            title=leptos::Signal::derive(|| "Delete Line".to_string())
            message=leptos::Signal::derive(move || {
                line_key.with(|k| format!(
                    "Delete line '{}'? This cannot be undone.",
                    k.as_ref().map(ToString::to_string).unwrap_or_default()
                ))
            })
            on_confirm=Rc::new(move || {
                set_confirm_delete.set(false);
                if let Some(key) = line_key.get_untracked() {
                    state.delete_line(&key);
                }
            })
            on_cancel=Rc::new(move || set_confirm_delete.set(false))
            confirm_text="Delete".to_string()
        />
    }
}
