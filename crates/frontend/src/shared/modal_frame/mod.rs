use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus positioned dialog surface.
///
/// Renders no header or buttons of its own; the caller supplies them.
#[component]
pub fn ModalFrame(
    /// Called on overlay click.
    on_close: Callback<()>,
    /// z-index of the overlay (default: 1050, above Bootstrap navbars).
    #[prop(optional)]
    z_index: Option<i32>,
    /// Extra class for the dialog surface (`div.modal-dialog`).
    #[prop(optional)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1050);
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only when press and release both happen on the overlay, so a text
    // selection that ends outside the dialog does not dismiss it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Next tick: the overlay is removed by the close itself
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let dialog_class = match modal_class {
        Some(cls) => format!("modal-dialog modal-dialog-centered {cls}"),
        None => "modal-dialog modal-dialog-centered".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); z-index: {z_index};")
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=dialog_class role="dialog" aria-modal="true" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-content">{children()}</div>
            </div>
        </div>
    }
}
