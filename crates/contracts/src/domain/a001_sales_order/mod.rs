//! Sales order line editor (a001)
//!
//! Headless model behind the order form: lines, price table, stock hints
//! and the derived summary. The frontend keeps these in signals and renders
//! them; every rule lives here so it can be tested without a browser.

pub mod aggregate;
pub mod config;
pub mod price_sync;
pub mod pricing;
pub mod stock;
pub mod summary;

pub use aggregate::{parse_quantity, LineKey, OrderLine, OrderLines, ProductCatalog, ProductOption};
pub use config::{InitialLine, OrderFormConfig};
pub use price_sync::{PriceCompletion, PriceSync, RequestToken};
pub use pricing::{annotate_label, PriceTable, PricesResponse, CURRENCY_LABEL};
pub use stock::StockStatus;
pub use summary::{parse_discount, OrderSummary};
