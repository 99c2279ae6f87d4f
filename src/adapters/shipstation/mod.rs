//! ShipStation integration
//!
//! The [`ShippingSource`] trait is the seam the export pipeline depends on;
//! [`ShipStationClient`] is the HTTP implementation and [`InMemorySource`]
//! serves fixed data.

pub mod client;
pub mod memory;
pub mod models;
pub mod source;

pub use client::ShipStationClient;
pub use memory::InMemorySource;
pub use source::ShippingSource;
