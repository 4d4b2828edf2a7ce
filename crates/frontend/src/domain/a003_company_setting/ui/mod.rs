pub mod logo_preview;
