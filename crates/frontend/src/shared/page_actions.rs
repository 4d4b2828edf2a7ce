//! Small behaviours server templates opt into with a class

use crate::shared::dom;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

const PRINT_SELECTOR: &str = ".js-print";
const SUBMIT_ON_CHANGE_SELECTOR: &str = ".js-submit-on-change";

/// `.js-print` elements open the print dialog instead of following their link.
pub fn install_print() -> Result<(), String> {
    for button in dom::query_document(PRINT_SELECTOR) {
        dom::listen(&button, "click", |event| {
            event.prevent_default();
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.print() {
                log::error!("Failed to open print dialog: {:?}", e);
            }
        })?;
    }
    Ok(())
}

/// Form a control belongs to, via its `form` property
fn owning_form(control: &Element) -> Option<HtmlFormElement> {
    if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        return select.form();
    }
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return input.form();
    }
    if let Some(textarea) = control.dyn_ref::<HtmlTextAreaElement>() {
        return textarea.form();
    }
    control
        .closest("form")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
}

/// `.js-submit-on-change` controls submit their form as soon as they change.
pub fn install_submit_on_change() -> Result<(), String> {
    for control in dom::query_document(SUBMIT_ON_CHANGE_SELECTOR) {
        let Some(form) = owning_form(&control) else {
            log::warn!("{} control outside a form", SUBMIT_ON_CHANGE_SELECTOR);
            continue;
        };
        dom::listen(&control, "change", move |_| {
            if let Err(e) = form.submit() {
                log::error!("Failed to submit form on change: {:?}", e);
            }
        })?;
    }
    Ok(())
}
