use leptos::{component, create_signal, event_target_value, view, IntoView, SignalGet, SignalSet, SignalWith};
use crate::components::add_line_dialog::AddLineDialog;
use crate::components::editor_state::EditorState;
use crate::components::map_canvas::{EditorTab, SelectedItem};
use crate::components::tab_view::{Tab, TabPanel, TabView};
use crate::models::LineKey;
use std::rc::Rc;

fn item_class(selected: bool) -> &'static str {
    if selected {
        "list-item selected"
    } else {
        "list-item"
    }
}

#[component]
#[must_use]
pub fn Sidebar(state: EditorState) -> impl IntoView {
    let (query, set_query) = create_signal(String::new());
    let (add_line_open, set_add_line_open) = create_signal(false);

    let tabs = vec![
        Tab { id: EditorTab::Stations, label: "Stations" },
        Tab { id: EditorTab::Lines, label: "Lines" },
    ];

    let station_items = move || {
        let query = query.get();
        let selected = state.selected.get();
        state.dataset.with(|dataset| {
            dataset
                .filter_stations(&query)
                .into_iter()
                .map(|station| {
                    let id = station.id;
                    view! {
                        <li
                            class=item_class(selected == SelectedItem::Station(id))
                            on:click=move |_| state.select_station(id)
                        >
                            {station.name.clone()}
                        </li>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    let line_items = move || {
        let query = query.get();
        let selected = state.selected.get();
        state.dataset.with(|dataset| {
            dataset
                .filter_line_keys(&query)
                .into_iter()
                .map(|key| {
                    let class = item_class(selected == SelectedItem::Line(key.clone()));
                    let label = key.to_string();
                    view! {
                        <li class=class on:click=move |_| state.select_line(&key)>
                            {label}
                        </li>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    let handle_add = move |_| match state.active_tab.get() {
        EditorTab::Stations => state.add_station(),
        EditorTab::Lines => set_add_line_open.set(true),
    };

    view! {
        <div class="sidebar">
            <h2 class="sidebar-title">"Navigation"</h2>
            <input
                type="search"
                class="sidebar-search"
                placeholder="Search..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />
            <TabView
                tabs=tabs
                active_tab=state.active_tab
                on_select=move |tab| state.change_tab(tab)
            >
                <TabPanel when=move || state.active_tab.get() == EditorTab::Stations>
                    <ul class="item-list">{station_items}</ul>
                </TabPanel>
                <TabPanel when=move || state.active_tab.get() == EditorTab::Lines>
                    <ul class="item-list">{line_items}</ul>
                </TabPanel>
            </TabView>
            <div class="sidebar-buttons">
                <button on:click=handle_add>
                    {move || match state.active_tab.get() {
                        EditorTab::Stations => "Add New Station",
                        EditorTab::Lines => "Add New Line",
                    }}
                </button>
                <button on:click=move |_| state.clear_selection()>
                    "Clear Selection"
                </button>
            </div>

            <AddLineDialog
                is_open=add_line_open.into()
                on_confirm=Rc::new(move |key: LineKey| {
                    if state.add_line(&key) {
                        set_add_line_open.set(false);
                    }
                })
                on_cancel=Rc::new(move || set_add_line_open.set(false))
            />
        </div>
    }
}
