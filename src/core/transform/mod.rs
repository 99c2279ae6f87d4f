//! Data transformation logic
//!
//! - **Enrich**: project reconciled shipments into flat export records
//! - **Normalize**: clean up carrier names in an exported table

pub mod enrich;
pub mod normalize;

pub use enrich::{EnrichOutcome, RecordEnricher};
pub use normalize::normalize_carriers;
