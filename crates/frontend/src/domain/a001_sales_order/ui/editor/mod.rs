//! Order line editor
//!
//! - view_model.rs: signals, derived totals and commands
//! - view.rs: line rows, add button, host summary bindings

mod view;
mod view_model;

pub use view::OrderLineEditor;
pub use view_model::OrderEditorViewModel;
