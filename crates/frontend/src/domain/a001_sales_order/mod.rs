//! Sales order form: line editor mounted into the server-rendered page
//!
//! - api.rs: price endpoint client
//! - host.rs: page config and markup reading, mounting
//! - ui/editor: view model and components

pub mod api;
pub mod host;
pub mod ui;
