use gloo_timers::callback::Timeout;
use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalUpdate, WriteSignal};

const TOAST_DURATION_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub visible: bool,
    /// Bumped on every show so a stale timeout cannot hide a newer toast
    pub generation: u64,
}

impl Toast {
    #[must_use]
    pub fn new(message: String, kind: ToastKind) -> Self {
        Self {
            message,
            kind,
            visible: true,
            generation: 0,
        }
    }

    fn class(&self) -> &'static str {
        match (self.visible, self.kind) {
            (false, _) => "toast",
            (true, ToastKind::Info) => "toast toast-visible",
            (true, ToastKind::Error) => "toast toast-visible toast-error",
        }
    }
}

/// Show `message` and hide it again after a few seconds
pub fn show_toast(set_toast: WriteSignal<Toast>, message: impl Into<String>, kind: ToastKind) {
    let mut generation = 0;
    set_toast.update(|toast| {
        generation = toast.generation.wrapping_add(1);
        *toast = Toast {
            generation,
            ..Toast::new(message.into(), kind)
        };
    });

    Timeout::new(TOAST_DURATION_MS, move || {
        set_toast.update(|toast| {
            if toast.generation == generation {
                toast.visible = false;
            }
        });
    })
    .forget();
}

#[component]
#[must_use]
pub fn ToastNotification(toast: ReadSignal<Toast>) -> impl IntoView {
    view! {
        {move || {
            let t = toast.get();
            let class = t.class();
            view! {
                <div class=class>
                    {t.visible.then_some(t.message)}
                </div>
            }
        }}
    }
}
