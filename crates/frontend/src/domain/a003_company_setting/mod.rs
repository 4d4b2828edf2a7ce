//! Company settings page

pub mod ui;
