use leptos::{component, store_value, view, Callable, Callback, Children, IntoView, Show, Signal, SignalGet};

#[derive(Clone, PartialEq)]
pub struct Tab<T> {
    pub id: T,
    pub label: &'static str,
}

/// Tab strip over `children`. The active tab is owned by the caller, which
/// hears about clicks through `on_select`.
#[component]
pub fn TabView<T>(
    tabs: Vec<Tab<T>>,
    #[prop(into)] active_tab: Signal<T>,
    #[prop(into)] on_select: Callback<T>,
    children: Children,
) -> impl IntoView
where
    T: Copy + PartialEq + 'static,
{
    view! {
        <div class="tab-view">
            <div class="tab-header">
                {tabs.into_iter().map(|tab| {
                    let tab_class = move || {
                        if active_tab.get() == tab.id {
                            "tab-button active"
                        } else {
                            "tab-button"
                        }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| on_select.call(tab.id)>
                            {tab.label}
                        </button>
                    }
                }).collect::<Vec<_>>()}
            </div>
            <div class="tab-content">
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn TabPanel(#[prop(into)] when: Signal<bool>, children: Children) -> impl IntoView {
    let children = store_value(children());
    view! {
        <Show when=move || when.get()>
            {children.with_value(|c| c.clone())}
        </Show>
    }
}
