//! Confirmation dialog
//!
//! `ConfirmService::request` shows the dialog and resolves to `true` when the
//! user confirms. `install_delegation` wires the `data-confirm` attributes of
//! server-rendered forms and links to it through two body-level listeners.

use crate::shared::dom;
use crate::shared::modal_frame::ModalFrame;
use futures::channel::oneshot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlAnchorElement, HtmlButtonElement, HtmlFormElement, KeyboardEvent};

/// What the dialog shows
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    /// Bootstrap button class of the confirm button
    pub confirm_class: String,
}

impl Default for ConfirmRequest {
    fn default() -> Self {
        Self {
            title: "Confirmation".to_string(),
            message: "Are you sure you want to proceed?".to_string(),
            confirm_label: "Confirm".to_string(),
            confirm_class: "btn-primary".to_string(),
        }
    }
}

impl ConfirmRequest {
    /// Builds a request from `data-*` attributes; `attr` receives the name without `data-`.
    ///
    /// `message` wins over `data-message` when given.
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>, message: Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, fallback: String| {
            attr(name).filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
        };
        Self {
            title: pick("title", defaults.title),
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| pick("message", defaults.message)),
            confirm_label: pick("btn-text", defaults.confirm_label),
            confirm_class: pick("btn-class", defaults.confirm_class),
        }
    }

    fn from_element(el: &Element, message: Option<String>) -> Self {
        Self::from_attributes(|name| el.get_attribute(&format!("data-{}", name)), message)
    }
}

#[derive(Clone, Copy)]
pub struct ConfirmService {
    pending: RwSignal<Option<ConfirmRequest>>,
    responder: StoredValue<Option<oneshot::Sender<bool>>>,
}

impl Default for ConfirmService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmService {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
            responder: StoredValue::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Opens the dialog. A dialog already on screen is resolved as cancelled.
    pub fn request(&self, request: ConfirmRequest) -> impl Future<Output = bool> {
        let (tx, rx) = oneshot::channel();
        let previous = self
            .responder
            .try_update_value(|slot| slot.replace(tx))
            .flatten();
        if let Some(previous) = previous {
            let _ = previous.send(false);
        }
        self.pending.set(Some(request));
        async move { rx.await.unwrap_or(false) }
    }

    pub fn resolve(&self, confirmed: bool) {
        self.pending.set(None);
        if let Some(tx) = self.responder.try_update_value(|slot| slot.take()).flatten() {
            let _ = tx.send(confirmed);
        }
    }
}

/// What happens after the user confirms
enum ConfirmTarget {
    Submit(HtmlFormElement),
    Navigate(String),
    Nothing,
}

impl ConfirmTarget {
    fn run(self) {
        match self {
            ConfirmTarget::Submit(form) => {
                // `submit()` does not fire the submit event, so the dialog is not shown again
                if let Err(e) = form.submit() {
                    log::error!("Failed to submit confirmed form: {:?}", e);
                }
            }
            ConfirmTarget::Navigate(href) => {
                let Some(window) = web_sys::window() else {
                    return;
                };
                if let Err(e) = window.location().set_href(&href) {
                    log::error!("Failed to navigate to {}: {:?}", href, e);
                }
            }
            ConfirmTarget::Nothing => {}
        }
    }
}

/// Message of a `data-confirm` style attribute; an empty one asks nothing.
fn confirm_message(raw: Option<String>) -> Option<String> {
    raw.filter(|m| !m.trim().is_empty())
}

fn ask_then(svc: ConfirmService, request: ConfirmRequest, target: ConfirmTarget) {
    spawn_local(async move {
        if svc.request(request).await {
            target.run();
        }
    });
}

fn on_submit(svc: ConfirmService, event: Event) {
    if event.default_prevented() {
        return;
    }
    let Some(form) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };
    let Some(message) = confirm_message(form.get_attribute("data-confirm")) else {
        return;
    };
    event.prevent_default();
    let request = ConfirmRequest::from_element(&form, Some(message));
    ask_then(svc, request, ConfirmTarget::Submit(form));
}

fn on_click(svc: ConfirmService, event: Event) {
    if event.default_prevented() {
        return;
    }
    let Some(trigger) = dom::event_closest(&event, "[data-confirm-click]") else {
        return;
    };
    let Some(message) = confirm_message(trigger.get_attribute("data-confirm-click")) else {
        return;
    };

    let target = if let Some(link) = trigger.dyn_ref::<HtmlAnchorElement>() {
        ConfirmTarget::Navigate(link.href())
    } else if let Some(button) = trigger.dyn_ref::<HtmlButtonElement>() {
        match button.form() {
            Some(form) if button.type_() == "submit" => {
                // Let native constraint validation speak first
                if !form.check_validity() {
                    form.report_validity();
                    event.prevent_default();
                    return;
                }
                ConfirmTarget::Submit(form)
            }
            _ => ConfirmTarget::Nothing,
        }
    } else {
        ConfirmTarget::Nothing
    };

    event.prevent_default();
    let request = ConfirmRequest::from_element(&trigger, Some(message));
    ask_then(svc, request, target);
}

/// Routes `data-confirm` forms and `data-confirm-click` triggers through `svc`.
pub fn install_delegation(svc: ConfirmService) -> Result<(), String> {
    let body = dom::document()
        .and_then(|d| d.body())
        .ok_or("No document body")?;
    dom::listen(&body, "submit", move |event| on_submit(svc, event))?;
    dom::listen(&body, "click", move |event| on_click(svc, event))?;
    Ok(())
}

/// Renders the dialog while a request is pending. Mount once.
#[component]
pub fn ConfirmHost() -> impl IntoView {
    let svc = use_context::<ConfirmService>()
        .expect("ConfirmService not provided in context (provide it in app root)");

    // Escape cancels
    Effect::new(move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let result = dom::listen(&window, "keydown", move |event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && svc.pending.get_untracked().is_some() {
                    svc.resolve(false);
                }
            }
        });
        if let Err(e) = result {
            log::warn!("{}", e);
        }
    });

    view! {
        {move || {
            svc.pending.get().map(|request| {
                let on_close = Callback::new(move |_| svc.resolve(false));
                view! {
                    <ModalFrame on_close=on_close modal_class="confirm-modal".to_string()>
                        <div class="modal-header">
                            <h5 class="modal-title">{request.title}</h5>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| svc.resolve(false)
                            ></button>
                        </div>
                        <div class="modal-body">{request.message}</div>
                        <div class="modal-footer">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                on:click=move |_| svc.resolve(false)
                            >
                                "Cancel"
                            </button>
                            <button
                                type="button"
                                class=format!("btn {}", request.confirm_class)
                                on:click=move |_| svc.resolve(true)
                            >
                                {request.confirm_label}
                            </button>
                        </div>
                    </ModalFrame>
                }
            })
        }}
    }
}
