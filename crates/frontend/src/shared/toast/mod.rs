//! Toast notifications
//!
//! `ToastService` is created once in the app root and provided via context.
//! `ToastHost` renders the stack; each toast expires on its own timer.

use crate::shared::dom;
use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const DEFAULT_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Bootstrap background class
    pub fn bg_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-success",
            ToastKind::Error => "bg-danger",
            ToastKind::Warning => "bg-warning",
            ToastKind::Info => "bg-info",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            ToastKind::Success => "check",
            ToastKind::Error | ToastKind::Warning => "alert",
            ToastKind::Info => "info",
        }
    }

    /// Kind of a server flash message from its `class` attribute
    pub fn from_alert_classes(classes: &str) -> Self {
        let has = |c: &str| classes.split_whitespace().any(|x| x == c);
        if has("alert-success") {
            ToastKind::Success
        } else if has("alert-danger") {
            ToastKind::Error
        } else if has("alert-warning") {
            ToastKind::Warning
        } else {
            ToastKind::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ToastEntry {
    id: u64,
    message: String,
    kind: ToastKind,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<ToastEntry>>,
    next_id: RwSignal<u64>,
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    /// Shows a toast and schedules its removal. Returns the toast id.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind, duration_ms: u32) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.toasts.update(|t| {
            t.push(ToastEntry {
                id,
                message: message.into(),
                kind,
            })
        });

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            svc.dismiss(id);
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Success, DEFAULT_DURATION_MS)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Error, DEFAULT_DURATION_MS)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Warning, DEFAULT_DURATION_MS)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Info, DEFAULT_DURATION_MS)
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|e| e.id != id));
    }

    /// Moves server flash messages (`.alert`) into toasts.
    pub fn adopt_flash_messages(&self) {
        for alert in dom::query_document(".alert") {
            let message = alert.text_content().unwrap_or_default().trim().to_string();
            let kind = ToastKind::from_alert_classes(&alert.class_name());
            if !message.is_empty() {
                self.show(message, kind, DEFAULT_DURATION_MS);
            }
            alert.remove();
        }
    }
}

/// Renders the toast stack. Mount once.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");

    view! {
        <div class="toast-container position-fixed top-0 end-0 p-3" style="z-index: 9999;">
            <For
                each=move || svc.toasts.get()
                key=|entry| entry.id
                children=move |entry| {
                    let id = entry.id;
                    view! {
                        <div
                            class=format!("toast show align-items-center text-white {} border-0", entry.kind.bg_class())
                            role="alert"
                            aria-live="assertive"
                            aria-atomic="true"
                        >
                            <div class="d-flex">
                                <div class="toast-body">
                                    <span class="me-2">{icon(entry.kind.icon_name())}</span>
                                    {entry.message}
                                </div>
                                <button
                                    type="button"
                                    class="btn-close btn-close-white me-2 m-auto"
                                    aria-label="Close"
                                    on:click=move |_| svc.dismiss(id)
                                ></button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
