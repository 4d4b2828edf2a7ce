//! Glue for server-rendered markup
//!
//! The pages are rendered by the backend; these helpers find host elements,
//! read their options and attach page-lifetime listeners.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlOptionElement, NodeList};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// `getElementById` cast to the expected element type
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// First element matching `selector`, cast to the expected type
pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// All elements under `root` matching `selector`
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(_) => Vec::new(),
    }
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All matching elements in the document
pub fn query_document(selector: &str) -> Vec<Element> {
    match document().and_then(|d| d.document_element()) {
        Some(root) => query_all(&root, selector),
        None => Vec::new(),
    }
}

/// An `<option>` as rendered by the server
#[derive(Debug, Clone)]
pub struct RawOption {
    pub value: String,
    pub text: String,
    element: HtmlOptionElement,
}

impl RawOption {
    pub fn element(&self) -> &HtmlOptionElement {
        &self.element
    }

    pub fn data(&self, name: &str) -> Option<String> {
        self.element.get_attribute(&format!("data-{}", name))
    }
}

pub fn read_options(elements: Vec<Element>) -> Vec<RawOption> {
    elements
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
        .map(|element| RawOption {
            value: element.value(),
            text: element.text().trim().to_string(),
            element,
        })
        .collect()
}

/// Attaches a listener that lives as long as the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), String>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| format!("Failed to listen for {}: {:?}", event, e))?;
    closure.forget();
    Ok(())
}

/// Sets `textContent` of the element with `id`, if the page has one.
pub fn set_text_by_id(id: &str, text: &str) {
    if let Some(el) = by_id::<Element>(id) {
        el.set_text_content(Some(text));
    }
}

/// Adds or removes a class on the element with `id`, if the page has one.
pub fn toggle_class_by_id(id: &str, class: &str, on: bool) {
    let Some(el) = by_id::<Element>(id) else {
        return;
    };
    let classes = el.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle .{} on #{}: {:?}", class, id, e);
    }
}

/// Element the event was dispatched on, walked up to the closest `selector` match
pub fn event_closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}
