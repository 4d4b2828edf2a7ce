//! Double-submit guard for the order form

use crate::shared::dom;
use web_sys::{Element, HtmlButtonElement};

const FORM_ID: &str = "orderForm";
const BUTTON_ID: &str = "submitBtn";

/// Disables `#submitBtn` and shows a spinner once `#orderForm` is submitted.
pub fn install() -> Result<(), String> {
    let Some(form) = dom::by_id::<Element>(FORM_ID) else {
        return Ok(());
    };
    dom::listen(&form, "submit", |_| {
        let Some(button) = dom::by_id::<HtmlButtonElement>(BUTTON_ID) else {
            return;
        };
        button.set_disabled(true);
        if let Err(e) = button.class_list().add_1("btn-loading") {
            log::warn!("Failed to mark submit button: {:?}", e);
        }
        button.set_inner_html(
            r#"<span class="spinner-border spinner-border-sm me-2"></span> Processing..."#,
        );
    })
}
