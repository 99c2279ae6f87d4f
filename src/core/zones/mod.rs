//! Shipping zone reference data and classification

pub mod classifier;
pub mod table;

pub use classifier::{ZoneClassifier, ZoneColumns};
pub use table::ZoneTable;
