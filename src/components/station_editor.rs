use leptos::{
    component, create_effect, create_signal, event_target_value, view, IntoView, Show, SignalGet,
    SignalGetUntracked, SignalSet, SignalUpdate, SignalWith, SignalWithUntracked, WriteSignal,
};
use crate::components::confirmation_dialog::ConfirmationDialog;
use crate::components::editor_state::EditorState;
use crate::components::map_canvas::SelectedItem;
use crate::constants::DEFAULT_BRANCH_NAME;
use crate::forms::{ConnectionRow, StationForm};
use crate::models::{Dataset, StationId, StationType};
use std::rc::Rc;

fn update_row(set_form: WriteSignal<StationForm>, index: usize, edit: impl FnOnce(&mut ConnectionRow)) {
    set_form.update(|form| {
        if let Some(row) = form.connections.get_mut(index) {
            edit(row);
        }
    });
}

#[component]
fn ConnectionTable(
    form: leptos::ReadSignal<StationForm>,
    set_form: WriteSignal<StationForm>,
    categories: leptos::Signal<Vec<String>>,
    line_names: leptos::Signal<Vec<Vec<String>>>,
    branch_names: leptos::Signal<Vec<String>>,
) -> impl IntoView {
    let rows = move || {
        form.with(|f| f.connections.clone())
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let lines_list = format!("connection-lines-{index}");
                let line_options = move || {
                    line_names.with(|names| names.get(index).cloned().unwrap_or_default())
                        .into_iter()
                        .map(|name| view! { <option value=name/> })
                        .collect::<Vec<_>>()
                };
                view! {
                    <tr>
                        <td>
                            <input
                                list="connection-categories"
                                prop:value=row.category
                                on:change=move |ev| update_row(set_form, index, |r| r.category = event_target_value(&ev))
                            />
                        </td>
                        <td>
                            <datalist id=lines_list.clone()>{line_options}</datalist>
                            <input
                                list=lines_list
                                prop:value=row.line
                                on:change=move |ev| update_row(set_form, index, |r| r.line = event_target_value(&ev))
                            />
                        </td>
                        <td>
                            <input
                                class="narrow"
                                prop:value=row.map_number
                                on:change=move |ev| update_row(set_form, index, |r| r.map_number = event_target_value(&ev))
                            />
                        </td>
                        <td>
                            <input
                                list="connection-branches"
                                prop:value=row.branch
                                on:change=move |ev| update_row(set_form, index, |r| r.branch = event_target_value(&ev))
                            />
                        </td>
                        <td>
                            <button
                                class="remove-row"
                                title="Remove connection"
                                on:click=move |_| set_form.update(|f| {
                                    if index < f.connections.len() {
                                        f.connections.remove(index);
                                    }
                                })
                            >
                                "Remove"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <fieldset class="connections">
            <legend>"Line Connections"</legend>
            <datalist id="connection-categories">
                {move || categories.get().into_iter().map(|c| view! { <option value=c/> }).collect::<Vec<_>>()}
            </datalist>
            <datalist id="connection-branches">
                {move || branch_names.get().into_iter().map(|b| view! { <option value=b/> }).collect::<Vec<_>>()}
            </datalist>
            <table class="connection-table">
                <thead>
                    <tr>
                        <th>"Category"</th>
                        <th>"Line"</th>
                        <th>"Map Number"</th>
                        <th>"Branch"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <button
                on:click=move |_| set_form.update(|f| f.connections.push(ConnectionRow {
                    branch: DEFAULT_BRANCH_NAME.to_string(),
                    ..ConnectionRow::default()
                }))
            >
                "+ Add Connection"
            </button>
        </fieldset>
    }
}

#[component]
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn StationEditor(state: EditorState) -> impl IntoView {
    let (form, set_form) = create_signal(StationForm::default());
    let (station_id, set_station_id) = create_signal(None::<StationId>);
    let (confirm_delete, set_confirm_delete) = create_signal(false);

    // Reload the form whenever a different station is selected
    create_effect(move |_| {
        let SelectedItem::Station(id) = state.selected.get() else {
            set_station_id.set(None);
            return;
        };
        let loaded = state.dataset.with_untracked(|d| d.station(id).map(StationForm::from_station));
        if let Some(loaded) = loaded {
            set_form.set(loaded);
        }
        set_station_id.set(Some(id));
    });

    // A drag on the map rewrites the coordinate fields
    create_effect(move |_| {
        let Some((id, (x, z))) = state.dragged_station.get() else { return };
        if station_id.get_untracked() == Some(id) {
            set_form.update(|f| {
                f.x = format!("{x:.2}");
                f.z = format!("{z:.2}");
            });
        }
    });

    let categories = leptos::Signal::derive(move || state.dataset.with(|d| d.lines.keys().cloned().collect::<Vec<_>>()));
    // Line suggestions follow each row's category
    let line_names = leptos::Signal::derive(move || {
        let rows = form.with(|f| f.connections.iter().map(|r| r.category.clone()).collect::<Vec<_>>());
        state.dataset.with(|d| rows.iter().map(|category| d.line_names_in(category.trim())).collect::<Vec<_>>())
    });
    let branch_names = leptos::Signal::derive(move || state.dataset.with(Dataset::branch_names));

    let handle_apply = move |_| {
        if let Some(id) = station_id.get_untracked() {
            form.with_untracked(|f| state.apply_station(id, f));
        }
    };

    let text_field = move |label: &'static str, get: fn(&StationForm) -> String, set: fn(&mut StationForm, String)| {
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
            when=move || station_id.get().is_some()
            fallback=|| view! { <p class="editor-placeholder">"Select a station to edit it."</p> }
        >
            <div class="station-editor">
                {text_field("Station Name", |f| f.name.clone(), |f, v| f.name = v)}
                <label>"Type"</label>
                <select on:change=move |ev| {
                    if let Some(station_type) = StationType::from_code(&event_target_value(&ev)) {
                        set_form.update(|f| f.station_type = station_type);
                    }
                }>
                    {StationType::ALL.into_iter().map(|t| view! {
                        <option value=t.code() selected=move || form.with(|f| f.station_type == t)>
                            {t.code()}
                        </option>
                    }).collect::<Vec<_>>()}
                </select>
                <fieldset class="elevator-levels" disabled=move || !form.with(StationForm::levels_enabled)>
                    <legend>"Elevator Levels"</legend>
                    {text_field("Y1", |f| f.y1.clone(), |f, v| f.y1 = v)}
                    {text_field("Y2", |f| f.y2.clone(), |f, v| f.y2 = v)}
                </fieldset>
                {text_field("X Coord", |f| f.x.clone(), |f, v| f.x = v)}
                {text_field("Z Coord", |f| f.z.clone(), |f, v| f.z = v)}
                <label>"Notes"</label>
                <textarea
                    prop:value=move || form.with(|f| f.notes.clone())
                    on:input=move |ev| set_form.update(|f| f.notes = event_target_value(&ev))
                />
                <ConnectionTable
                    form=form
                    set_form=set_form
                    categories=categories
                    line_names=line_names
                    branch_names=branch_names
                />
                <div class="editor-buttons">
                    <button class="primary" on:click=handle_apply>"Apply Changes"</button>
                    <button class="danger" on:click=move |_| set_confirm_delete.set(true)>"Delete Station"</button>
                </div>
            </div>
        </Show>

        <ConfirmationDialog
            is_open=confirm_delete.into()
            title=leptos::Signal::derive(|| "Delete Station".to_string())
            message=leptos::Signal::derive(move || {
                form.with(|f| format!("Delete station '{}'? This cannot be undone.", f.name))
            })
            on_confirm=Rc::new(move || {
                set_confirm_delete.set(false);
                if let Some(id) = station_id.get_untracked() {
                    state.delete_station(id);
                }
            })
            on_cancel=Rc::new(move || set_confirm_delete.set(false))
            confirm_text="Delete".to_string()
        />
    }
}
