//! Flattened export record
//!
//! One `OutputRecord` is produced per shipment line item. Field order here is
//! the column order of the export CSV.

use super::ids::{OrderId, ShipmentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the shipment export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Label print (create) date
    pub print_date: Option<NaiveDate>,

    /// Shipment id
    pub ship_id: ShipmentId,

    /// Order id
    pub order_id: OrderId,

    /// Line item name
    pub items: Option<String>,

    /// Line item quantity
    pub qty: i64,

    /// Ship date
    pub ship_date: Option<NaiveDate>,

    /// Recipient name
    pub name: Option<String>,

    /// Customer id from the order
    pub id: Option<String>,

    /// Recipient phone
    pub phone: Option<String>,

    /// Customer email from the order
    pub email: Option<String>,

    /// Tracking number
    pub tracking: Option<String>,

    /// Carrier display name, empty when the code is unknown
    pub carrier: String,

    /// Service display name, empty when the code is unknown
    pub service: String,

    /// Destination country code
    pub country: Option<String>,

    /// Label cost
    pub cost: f64,

    /// Line item SKU
    pub sku: Option<String>,

    /// Shipping zone, filled by post-processing
    pub zone: Option<String>,
}

impl OutputRecord {
    /// Export column names in output order
    pub const COLUMNS: [&'static str; 17] = [
        "print_date",
        "ship_id",
        "order_id",
        "items",
        "qty",
        "ship_date",
        "name",
        "id",
        "phone",
        "email",
        "tracking",
        "carrier",
        "service",
        "country",
        "cost",
        "sku",
        "zone",
    ];
}
