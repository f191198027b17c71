use leptos::{component, store_value, view, Callable, Callback, Children, IntoView, Signal, SignalGet};

/// Dimmed backdrop holding a dialog. Clicking the backdrop itself, not the
/// dialog, calls `on_dismiss`.
#[component]
#[must_use]
pub fn ModalOverlay(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] on_dismiss: Callback<()>,
    children: Children,
) -> impl IntoView {
    let children = store_value(children());

    view! {
        {move || if is_open.get() {
            view! {
                <div
                    class="modal-overlay"
                    on:click=move |ev| {
                        if ev.target() == ev.current_target() {
                            on_dismiss.call(());
                        }
                    }
                >
                    <div class="modal-dialog">
                        {children.get_value()}
                    </div>
                </div>
            }.into_view()
        } else {
            ().into_view()
        }}
    }
}
