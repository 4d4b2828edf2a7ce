//! Common types shared by all aggregates

pub mod aggregate_id;

// Re-exports
pub use aggregate_id::{AggregateId, CustomerId, LocationId, ProductId};
