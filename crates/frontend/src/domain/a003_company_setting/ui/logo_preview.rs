//! Live preview of the logo picked on the company settings form

use crate::shared::dom;
use std::cell::RefCell;
use web_sys::{Element, File, HtmlImageElement, HtmlInputElement, Url};

const INPUT_ID: &str = "id_logo";
const PREVIEW_ID: &str = "logo-preview";
const CONTAINER_ID: &str = "logo-preview-container";
const NOT_AN_IMAGE: &str = "Please select an image file (PNG, JPG, etc.).";

/// What the preview shows after the file input changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoPreview {
    /// The picked file is an image
    Picked,
    /// A non-image file was picked
    Rejected,
    /// Nothing picked; the logo already on record
    Existing(String),
    Hidden,
}

impl LogoPreview {
    /// `file_type` is the MIME type of the picked file, `None` when the selection was cleared.
    pub fn for_selection(file_type: Option<&str>, existing_url: &str) -> Self {
        match file_type {
            Some(t) if t.starts_with("image/") => LogoPreview::Picked,
            Some(_) => LogoPreview::Rejected,
            None if !existing_url.is_empty() => LogoPreview::Existing(existing_url.to_string()),
            None => LogoPreview::Hidden,
        }
    }
}

fn show(preview: &HtmlImageElement, src: &str) {
    preview.set_src(src);
    if let Err(e) = preview.class_list().remove_1("d-none") {
        log::warn!("Failed to show logo preview: {:?}", e);
    }
}

fn hide(preview: &HtmlImageElement) {
    preview.set_src("");
    if let Err(e) = preview.class_list().add_1("d-none") {
        log::warn!("Failed to hide logo preview: {:?}", e);
    }
}

/// Object URL of the file currently previewed, released when replaced
#[derive(Default)]
struct PickedUrl(RefCell<Option<String>>);

impl PickedUrl {
    fn replace(&self, url: Option<String>) {
        if let Some(old) = self.0.replace(url) {
            if let Err(e) = Url::revoke_object_url(&old) {
                log::warn!("Failed to release logo preview URL: {:?}", e);
            }
        }
    }
}

fn on_change(
    input: &HtmlInputElement,
    preview: &HtmlImageElement,
    existing: &str,
    picked: &PickedUrl,
) {
    let file: Option<File> = input.files().and_then(|files| files.get(0));
    let file_type = file.as_ref().map(|f| f.type_());
    match LogoPreview::for_selection(file_type.as_deref(), existing) {
        LogoPreview::Picked => {
            let Some(file) = file else {
                return;
            };
            match Url::create_object_url_with_blob(&file) {
                Ok(url) => {
                    show(preview, &url);
                    picked.replace(Some(url));
                }
                Err(e) => log::error!("Failed to preview logo {}: {:?}", file.name(), e),
            }
        }
        LogoPreview::Rejected => {
            hide(preview);
            picked.replace(None);
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.alert_with_message(NOT_AN_IMAGE) {
                    log::warn!("Failed to show alert: {:?}", e);
                }
            }
        }
        LogoPreview::Existing(url) => {
            show(preview, &url);
            picked.replace(None);
        }
        LogoPreview::Hidden => {
            hide(preview);
            picked.replace(None);
        }
    }
}

/// Wires the preview if the page has a logo input.
pub fn install() -> Result<(), String> {
    let (Some(input), Some(preview)) = (
        dom::by_id::<HtmlInputElement>(INPUT_ID),
        dom::by_id::<HtmlImageElement>(PREVIEW_ID),
    ) else {
        return Ok(());
    };
    let existing = dom::by_id::<Element>(CONTAINER_ID)
        .and_then(|c| c.get_attribute("data-existing-url"))
        .unwrap_or_default();
    let picked = PickedUrl::default();

    let source = input.clone();
    dom::listen(&input, "change", move |_| {
        on_change(&source, &preview, &existing, &picked)
    })
}
