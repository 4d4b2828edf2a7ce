use crate::domain::a002_address::ui::cascade;
use crate::domain::a003_company_setting::ui::logo_preview;
use crate::shared::confirm::{self, ConfirmHost, ConfirmService};
use crate::shared::{page_actions, submit_guard, table_tools};
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;

/// Page-wide services: toasts, confirmation dialog and form helpers.
///
/// Created once per page load; the page's own markup stays server-rendered.
#[component]
pub fn App() -> impl IntoView {
    let toasts = ToastService::new();
    provide_context(toasts);

    // Central confirmation dialog, replaces per-page confirm() calls
    let confirm = ConfirmService::new();
    provide_context(confirm);

    toasts.adopt_flash_messages();

    for (name, result) in [
        ("confirmation", confirm::install_delegation(confirm)),
        ("submit guard", submit_guard::install()),
        ("print buttons", page_actions::install_print()),
        ("submit on change", page_actions::install_submit_on_change()),
        ("address cascade", cascade::install()),
        ("logo preview", logo_preview::install()),
        ("table labels", table_tools::install_stack_labels()),
        ("shop search", table_tools::install_search()),
    ] {
        if let Err(e) = result {
            log::error!("Failed to install {}: {}", name, e);
        }
    }

    view! {
        <ToastHost />
        <ConfirmHost />
    }
}
