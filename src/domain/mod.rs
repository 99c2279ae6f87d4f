//! Domain models and types for Shipex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ShipmentId`], [`OrderId`])
//! - **Domain models** ([`Shipment`], [`Order`], [`Carrier`], [`ShippingService`])
//! - **The export row** ([`OutputRecord`])
//! - **Error types** ([`ShipexError`], [`ShipStationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Shipment and order ids are distinct newtypes:
//!
//! ```rust
//! use shipex::domain::{OrderId, ShipmentId};
//!
//! let shipment_id = ShipmentId::new(220275386);
//! let order_id = OrderId::new(100);
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: OrderId = shipment_id;
//! # let _ = (shipment_id, order_id);
//! ```

pub mod carrier;
pub mod date_range;
pub mod errors;
pub mod ids;
pub mod order;
pub mod record;
pub mod result;
pub mod shipment;

// Re-export commonly used types for convenience
pub use carrier::{Carrier, CarrierLookup, ShippingService};
pub use date_range::DateRange;
pub use errors::{ShipStationError, ShipexError};
pub use ids::{OrderId, ShipmentId};
pub use order::{Order, OrderMap};
pub use record::OutputRecord;
pub use result::Result;
pub use shipment::{ShipTo, Shipment, ShipmentBuilder, ShipmentItem};
