//! Bridge between the server-rendered order page and the line editor
//!
//! Reads `window.orderFormConfig`, product options and any pre-rendered
//! rows, then replaces the `#items` container with the editor and wires the
//! customer, discount and add-item controls that stay in the page.

use super::ui::editor::{OrderEditorViewModel, OrderLineEditor};
use crate::shared::dom;
use contracts::domain::a001_sales_order::{
    InitialLine, OrderFormConfig, OrderLines, ProductCatalog, ProductOption,
};
use contracts::domain::common::ProductId;
use leptos::prelude::*;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTemplateElement};

const CONTAINER_ID: &str = "items";
const CONFIG_KEY: &str = "orderFormConfig";
const DEFAULT_PRODUCT_PLACEHOLDER: &str = "---------";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window is not available")]
    NoWindow,
    #[error("failed to read window.orderFormConfig: {0}")]
    Read(String),
    #[error("invalid window.orderFormConfig: {0}")]
    Decode(String),
}

/// Reads the page config; an absent config means all defaults.
pub fn read_config() -> Result<OrderFormConfig, ConfigError> {
    let window = web_sys::window().ok_or(ConfigError::NoWindow)?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_KEY))
        .map_err(|e| ConfigError::Read(format!("{:?}", e)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(OrderFormConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Decode(e.to_string()))
}

/// `<option>` elements of `#productOptionsTemplate`, or of the first product select
fn product_option_elements() -> Vec<Element> {
    if let Some(template) = dom::by_id::<Element>("productOptionsTemplate") {
        return match template.dyn_ref::<HtmlTemplateElement>() {
            Some(t) => t
                .content()
                .query_selector_all("option")
                .map(|list| dom::elements(&list))
                .unwrap_or_default(),
            None => dom::query_all(&template, "option"),
        };
    }
    match dom::query::<Element>("select.product-select") {
        Some(select) => dom::query_all(&select, "option"),
        None => Vec::new(),
    }
}

/// Product options and the placeholder label from the page markup
fn catalog_from_markup() -> (Vec<ProductOption>, Option<String>) {
    let mut placeholder = None;
    let mut products = Vec::new();
    for option in dom::read_options(product_option_elements()) {
        match ProductId::from_form_value(&option.value) {
            Some(id) => products.push(ProductOption {
                id,
                stock: option.data("stock").and_then(|s| s.trim().parse::<i64>().ok()),
                label: option.text,
            }),
            None => {
                placeholder.get_or_insert(option.text);
            }
        }
    }
    (products, placeholder)
}

/// Rows the server rendered into the container (edit page)
fn initial_lines_from_markup(container: &Element) -> Vec<InitialLine> {
    dom::query_all(container, ".item-row")
        .iter()
        .map(|row| {
            let product = row
                .query_selector(".product-select")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value());
            let quantity = row
                .query_selector(".qty-input")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|i| i.value());
            InitialLine {
                product_id: product.filter(|v| !v.is_empty()),
                quantity: quantity.filter(|v| !v.is_empty()),
            }
        })
        .collect()
}

fn customer_select() -> Option<HtmlSelectElement> {
    dom::by_id::<HtmlSelectElement>("customer_id")
        .or_else(|| dom::by_id::<HtmlSelectElement>("id_customer"))
}

/// Hooks the controls that stay server-rendered. Returns whether the page has its own add button.
fn wire_host_controls(vm: OrderEditorViewModel) -> bool {
    if let Some(select) = customer_select() {
        let initial = select.value();
        let source = select.clone();
        let wired = dom::listen(&select, "change", move |_| {
            vm.refresh_prices_command(source.value());
        });
        if let Err(e) = wired {
            log::warn!("{}", e);
        }
        if !initial.is_empty() {
            vm.refresh_prices_command(initial);
        }
    }

    if let Some(input) = dom::query::<HtmlInputElement>(r#"[name="discount_amount"]"#) {
        vm.set_discount(input.value());
        let source = input.clone();
        if let Err(e) = dom::listen(&input, "input", move |_| vm.set_discount(source.value())) {
            log::warn!("{}", e);
        }
    }

    match dom::by_id::<Element>("addItem") {
        Some(button) => match dom::listen(&button, "click", move |_| vm.add_line()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        },
        None => false,
    }
}

/// Mounts the editor into `#items`. Returns `false` when the page has no editable order form.
pub fn mount() -> bool {
    let Some(container) = dom::by_id::<HtmlElement>(CONTAINER_ID) else {
        return false;
    };

    let config = read_config().unwrap_or_else(|e| {
        log::warn!("Using default order form config: {}", e);
        OrderFormConfig::default()
    });
    if config.is_locked {
        log::info!("Order is locked, line editor not mounted");
        return false;
    }
    if !config.has_price_endpoint() {
        log::warn!("No price endpoint configured, prices stay at 0");
    }

    // Read everything the server rendered before the container is replaced
    let (markup_products, placeholder) = catalog_from_markup();
    let catalog = if config.products.is_empty() {
        ProductCatalog::new(markup_products)
    } else {
        config.catalog()
    };
    let initial = if config.initial_lines.is_empty() {
        initial_lines_from_markup(&container)
    } else {
        config.initial_lines.clone()
    };
    let lines = OrderLines::from_initial(&initial, config.item_count);
    let product_placeholder =
        placeholder.unwrap_or_else(|| DEFAULT_PRODUCT_PLACEHOLDER.to_string());

    log::info!(
        "Mounting order line editor: {} lines, {} products",
        lines.len(),
        catalog.options().len()
    );

    container.set_inner_html("");
    let OrderFormConfig {
        products_url,
        qty_placeholder,
        ..
    } = config;

    leptos::mount::mount_to(container, move || {
        let vm = OrderEditorViewModel::new(lines, catalog, products_url);
        let host_add_button = wire_host_controls(vm);
        view! {
            <OrderLineEditor
                vm=vm
                qty_placeholder=qty_placeholder
                product_placeholder=product_placeholder
                show_add_button=!host_add_button
            />
        }
    })
    .forget();

    true
}
