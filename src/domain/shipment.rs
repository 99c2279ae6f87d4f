//! Shipment domain model
//!
//! A shipment is one outbound package with one or more line items. Shipments
//! are immutable once fetched from ShipStation.

use super::ids::{OrderId, ShipmentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recipient details printed on the label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipTo {
    /// Recipient name
    pub name: Option<String>,

    /// Recipient phone number
    pub phone: Option<String>,

    /// ISO 3166 alpha-2 destination country code
    pub country: Option<String>,
}

/// One SKU + quantity entry within a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// Item display name
    pub name: Option<String>,

    /// Quantity shipped
    pub quantity: i64,

    /// Stock keeping unit
    pub sku: Option<String>,
}

impl ShipmentItem {
    /// Create a line item
    pub fn new(sku: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: None,
            quantity,
            sku: Some(sku.into()),
        }
    }

    /// Set the item name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Represents a ShipStation shipment
///
/// # Examples
///
/// ```
/// use shipex::domain::shipment::{ShipmentBuilder, ShipmentItem};
///
/// let shipment = ShipmentBuilder::new(1, 100)
///     .carrier_code("ups")
///     .item(ShipmentItem::new("A", 2))
///     .build();
///
/// assert_eq!(shipment.items.len(), 1);
/// assert!(!shipment.voided);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// ShipStation shipment id
    pub shipment_id: ShipmentId,

    /// Order this shipment fulfils
    pub order_id: OrderId,

    /// Carrier tracking number
    pub tracking_number: Option<String>,

    /// Label creation (print) date
    pub create_date: Option<NaiveDate>,

    /// Ship date
    pub ship_date: Option<NaiveDate>,

    /// Carrier code, e.g. `ups` or `stamps_com`
    pub carrier_code: Option<String>,

    /// Service code, e.g. `ups_ground`
    pub service_code: Option<String>,

    /// Label cost
    pub shipment_cost: f64,

    /// Whether the label was voided
    pub voided: bool,

    /// Recipient
    pub ship_to: ShipTo,

    /// Ordered line items
    pub items: Vec<ShipmentItem>,
}

/// Builder for constructing Shipment instances
#[derive(Debug)]
pub struct ShipmentBuilder {
    shipment: Shipment,
}

impl ShipmentBuilder {
    /// Start a shipment with its two required identifiers
    pub fn new(shipment_id: i64, order_id: i64) -> Self {
        Self {
            shipment: Shipment {
                shipment_id: ShipmentId::new(shipment_id),
                order_id: OrderId::new(order_id),
                tracking_number: None,
                create_date: None,
                ship_date: None,
                carrier_code: None,
                service_code: None,
                shipment_cost: 0.0,
                voided: false,
                ship_to: ShipTo::default(),
                items: Vec::new(),
            },
        }
    }

    /// Sets the tracking number
    pub fn tracking_number(mut self, tracking: impl Into<String>) -> Self {
        self.shipment.tracking_number = Some(tracking.into());
        self
    }

    /// Sets the create (print) date
    pub fn create_date(mut self, date: NaiveDate) -> Self {
        self.shipment.create_date = Some(date);
        self
    }

    /// Sets the ship date
    pub fn ship_date(mut self, date: NaiveDate) -> Self {
        self.shipment.ship_date = Some(date);
        self
    }

    /// Sets the carrier code
    pub fn carrier_code(mut self, code: impl Into<String>) -> Self {
        self.shipment.carrier_code = Some(code.into());
        self
    }

    /// Sets the service code
    pub fn service_code(mut self, code: impl Into<String>) -> Self {
        self.shipment.service_code = Some(code.into());
        self
    }

    /// Sets the label cost
    pub fn cost(mut self, cost: f64) -> Self {
        self.shipment.shipment_cost = cost;
        self
    }

    /// Marks the shipment voided
    pub fn voided(mut self, voided: bool) -> Self {
        self.shipment.voided = voided;
        self
    }

    /// Sets the recipient
    pub fn ship_to(mut self, ship_to: ShipTo) -> Self {
        self.shipment.ship_to = ship_to;
        self
    }

    /// Appends a line item
    pub fn item(mut self, item: ShipmentItem) -> Self {
        self.shipment.items.push(item);
        self
    }

    /// Builds the shipment
    pub fn build(self) -> Shipment {
        self.shipment
    }
}
