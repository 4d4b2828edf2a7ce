pub mod a001_sales_order;
pub mod a002_address;
pub mod common;
