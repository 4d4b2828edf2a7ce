//! Country → region → township selects on address forms

pub mod ui;
