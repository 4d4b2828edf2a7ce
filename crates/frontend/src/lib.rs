pub mod app;
pub mod domain;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(app::App);

    if !domain::a001_sales_order::host::mount() {
        log::debug!("No editable order form on this page");
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
