use crate::components::editor_state::EditorState;
use crate::components::map_canvas::{renderer, EditorMode, PointerButton};
use leptos::wasm_bindgen::JsCast;
use leptos::{component, create_effect, create_node_ref, view, IntoView, SignalGet, SignalWith};
use web_sys::{CanvasRenderingContext2d, MouseEvent, WheelEvent};

#[must_use]
pub fn cursor_style(mode: EditorMode) -> &'static str {
    match mode {
        EditorMode::PathEditing | EditorMode::VertexSelected => "cursor: crosshair;",
        EditorMode::VertexDragging => "cursor: grabbing;",
        EditorMode::Browsing | EditorMode::StationSelected | EditorMode::LineSelected => "cursor: default;",
    }
}

fn setup_render_effect(state: EditorState, canvas_ref: leptos::NodeRef<leptos::html::Canvas>) {
    create_effect(move |_| {
        let _ = state.redraw.get();

        let Some(canvas) = canvas_ref.get() else { return };

        let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
        let container_width = canvas_elem.client_width() as u32;
        let container_height = canvas_elem.client_height() as u32;

        if container_width > 0 && container_height > 0 {
            canvas_elem.set_width(container_width);
            canvas_elem.set_height(container_height);
        }

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            leptos::logging::error!("Failed to get 2D canvas context");
            return;
        };

        state.with_engine(|engine| {
            engine.set_canvas_size(f64::from(container_width), f64::from(container_height));
        });
        state
            .dataset
            .with(|dataset| state.engine.with_value(|engine| renderer::draw_map(&ctx, dataset, engine)));
    });
}

fn canvas_point(canvas_ref: leptos::NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
    let canvas_elem = canvas_ref.get()?;
    let canvas: &web_sys::HtmlCanvasElement = &canvas_elem;
    let rect = canvas.get_bounding_client_rect();
    Some((f64::from(ev.client_x()) - rect.left(), f64::from(ev.client_y()) - rect.top()))
}

#[component]
#[must_use]
pub fn MapView(state: EditorState) -> impl IntoView {
    let canvas_ref = create_node_ref::<leptos::html::Canvas>();

    setup_render_effect(state, canvas_ref);

    let _ = leptos::leptos_dom::helpers::window_event_listener(leptos::ev::resize, move |_| {
        state.request_redraw();
    });

    let handle_mouse_down = move |ev: MouseEvent| {
        let Some(button) = PointerButton::from_dom(ev.button()) else { return };
        if let Some(point) = canvas_point(canvas_ref, &ev) {
            state.pointer_down(point, button);
        }
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        if let Some(point) = canvas_point(canvas_ref, &ev) {
            state.pointer_move(point);
        }
    };

    let handle_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        state.wheel(ev.delta_y());
    };

    let cursor = move || {
        let _ = state.redraw.get();
        state.engine.with_value(|engine| cursor_style(engine.mode()))
    };

    view! {
        <div class="map-canvas-container">
            <canvas
                node_ref=canvas_ref
                class="map-canvas"
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=move |_| state.pointer_up()
                on:mouseleave=move |_| state.pointer_leave()
                on:wheel=handle_wheel
                on:contextmenu=|ev| ev.prevent_default()
                style=cursor
            />
        </div>
    }
}
