//! Address cascade (a002): country → region → township

pub mod aggregate;

pub use aggregate::{AddressCascade, AddressSelection, CascadeLevel, CascadeResult, LocationOption};
