use leptos::{component, view, IntoView, Signal, SignalGet};
use crate::components::modal_overlay::ModalOverlay;
use std::rc::Rc;

#[allow(clippy::needless_pass_by_value)]
#[component]
pub fn ConfirmationDialog(
    is_open: Signal<bool>,
    title: Signal<String>,
    message: Signal<String>,
    on_confirm: Rc<dyn Fn()>,
    on_cancel: Rc<dyn Fn()>,
    #[prop(optional)] confirm_text: Option<String>,
) -> impl IntoView {
    let confirm_label = confirm_text.unwrap_or_else(|| "Confirm".to_string());

    let on_cancel_overlay = on_cancel.clone();
    let on_cancel_button = on_cancel.clone();

    view! {
        <ModalOverlay is_open=is_open on_dismiss=move |()| on_cancel_overlay()>
            <div class="confirmation-dialog-content">
                <h3 class="dialog-title">{move || title.get()}</h3>
                <p class="confirmation-message">
                    {move || message.get()}
                </p>
                <div class="confirmation-buttons">
                    <button
                        class="cancel-button"
                        on:click=move |_| on_cancel_button()
                    >
                        "Cancel"
                    </button>
                    <button
                        class="confirm-button danger"
                        on:click=move |_| on_confirm()
                    >
                        {confirm_label.clone()}
                    </button>
                </div>
            </div>
        </ModalOverlay>
    }
}
