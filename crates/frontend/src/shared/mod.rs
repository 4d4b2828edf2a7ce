pub mod api_utils;
pub mod confirm;
pub mod dom;
pub mod icons;
pub mod modal_frame;
pub mod page_actions;
pub mod submit_guard;
pub mod table_tools;
pub mod toast;
