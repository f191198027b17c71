use leptos::{component, view, IntoView, SignalGet};
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use crate::components::editor_state::{create_editor_state, document_title};
use crate::components::highway_editor::HighwayEditor;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let state = create_editor_state();
    let title = move || document_title(state.file_name.get().as_deref(), state.dirty.get());

    view! {
        <Stylesheet id="leptos" href="/pkg/highway_editor.css"/>
        <Title text=title/>

        <div class="app">
            <HighwayEditor state=state/>
        </div>
    }
}
