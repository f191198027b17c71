use leptos::{
    component, create_signal, event_target_value, view, IntoView, Signal, SignalGet, SignalGetUntracked, SignalSet,
};
use crate::components::modal_overlay::ModalOverlay;
use crate::components::shortcuts::submits_field;
use crate::models::LineKey;
use std::rc::Rc;

/// Prompt for a new line as category and name. The two fields are handed to
/// `on_confirm` as a key; validation happens there.
#[allow(clippy::needless_pass_by_value)]
#[component]
pub fn AddLineDialog(
    is_open: Signal<bool>,
    on_confirm: Rc<dyn Fn(LineKey)>,
    on_cancel: Rc<dyn Fn()>,
) -> impl IntoView {
    let (category, set_category) = create_signal(String::new());
    let (name, set_name) = create_signal(String::new());

    let submit = move || {
        let key = LineKey::new(category.get_untracked().trim(), name.get_untracked().trim());
        on_confirm(key);
    };
    let submit_enter = submit.clone();
    let on_cancel_overlay = on_cancel.clone();
    let on_cancel_button = on_cancel.clone();

    view! {
        <ModalOverlay is_open=is_open on_dismiss=move |()| on_cancel_overlay()>
            <div class="add-line-dialog">
                <h3 class="dialog-title">"Add Line"</h3>
                <label>"Category"</label>
                <input
                    type="text"
                    prop:value=move || category.get()
                    on:input=move |ev| set_category.set(event_target_value(&ev))
                    prop:autofocus=true
                />
                <label>"Name"</label>
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if submits_field(&ev.key(), ev.is_composing()) {
                            submit_enter();
                        }
                    }
                />
                <div class="dialog-buttons">
                    <button on:click=move |_| on_cancel_button()>
                        "Cancel"
                    </button>
                    <button class="primary" on:click=move |_| submit()>
                        "Add"
                    </button>
                </div>
            </div>
        </ModalOverlay>
    }
}
