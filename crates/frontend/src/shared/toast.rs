//! Transient notifications shown in the corner of the editor page.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const TOAST_LIFETIME_MS: u32 = 4_000;
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn provide() -> Self {
        let toasts = Self::new();
        provide_context(toasts);
        toasts
    }

    pub fn expect() -> Self {
        use_context::<Self>().expect("Toasts context not found")
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        let message = message.into();
        match kind {
            ToastKind::Error => log::error!("{}", message),
            _ => log::info!("{}", message),
        }
        self.items.update(|items| {
            items.push(Toast { id, kind, message });
            if items.len() > MAX_VISIBLE {
                items.remove(0);
            }
        });

        let toasts = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            toasts.dismiss(id);
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self
            .items
            .try_update(|items| items.retain(|toast| toast.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = Toasts::expect();

    view! {
        <div class="toast-stack i18n-editor-ui">
            <For
                each=move || toasts.items.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let intent = match toast.kind {
                        ToastKind::Success => MessageBarIntent::Success,
                        ToastKind::Error => MessageBarIntent::Error,
                        ToastKind::Info => MessageBarIntent::Info,
                    };
                    let id = toast.id;
                    view! {
                        <div class="toast-stack__item" on:click=move |_| toasts.dismiss(id)>
                            <MessageBar intent=intent>
                                {toast.message}
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
