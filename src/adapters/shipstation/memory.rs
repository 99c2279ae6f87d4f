//! In-memory shipping source
//!
//! Serves fixed shipments, orders and carriers without network access and
//! records what was asked of it. Used by tests and local pipeline checks.

use super::ShippingSource;
use crate::domain::{Carrier, DateRange, Order, OrderId, Result, Shipment, ShippingService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;

/// A [`ShippingSource`] backed by vectors
///
/// # Example
///
/// ```rust
/// use shipex::adapters::shipstation::{InMemorySource, ShippingSource};
/// use shipex::domain::{DateRange, ShipmentBuilder, ShipmentItem};
///
/// # async fn example() -> shipex::domain::Result<()> {
/// let source = InMemorySource::new()
///     .with_shipments(vec![ShipmentBuilder::new(1, 100).item(ShipmentItem::new("A", 2)).build()]);
///
/// let range = DateRange::parse("2024-02-01", "2024-02-29").unwrap();
/// assert_eq!(source.list_shipments(&range).await?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemorySource {
    shipments: Vec<Shipment>,
    bulk_orders: Vec<Order>,
    lookup_orders: HashMap<OrderId, Order>,
    carriers: Vec<Carrier>,
    services: Vec<ShippingService>,
    empty_shipment_responses: u32,
    shipment_calls: AtomicU32,
    bulk_ranges: Mutex<Vec<DateRange>>,
    order_lookups: Mutex<Vec<OrderId>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shipments(mut self, shipments: Vec<Shipment>) -> Self {
        self.shipments = shipments;
        self
    }

    /// Orders returned by the date-ranged bulk search
    pub fn with_bulk_orders(mut self, orders: Vec<Order>) -> Self {
        self.bulk_orders = orders;
        self
    }

    /// An order reachable only through the single-order lookup
    pub fn with_lookup_order(mut self, order: Order) -> Self {
        self.lookup_orders.insert(order.order_id, order);
        self
    }

    pub fn with_carriers(mut self, carriers: Vec<Carrier>) -> Self {
        self.carriers = carriers;
        self
    }

    pub fn with_services(mut self, services: Vec<ShippingService>) -> Self {
        self.services = services;
        self
    }

    /// Answer the first `count` shipment searches with no rows
    pub fn with_empty_shipment_responses(mut self, count: u32) -> Self {
        self.empty_shipment_responses = count;
        self
    }

    /// Number of shipment searches made
    pub fn shipment_calls(&self) -> u32 {
        self.shipment_calls.load(Ordering::SeqCst)
    }

    /// Date windows of every bulk order search
    pub async fn bulk_ranges(&self) -> Vec<DateRange> {
        self.bulk_ranges.lock().await.clone()
    }

    /// Ids of every single-order lookup, in call order
    pub async fn order_lookups(&self) -> Vec<OrderId> {
        self.order_lookups.lock().await.clone()
    }
}

#[async_trait]
impl ShippingSource for InMemorySource {
    async fn list_shipments(&self, _range: &DateRange) -> Result<Vec<Shipment>> {
        let call = self.shipment_calls.fetch_add(1, Ordering::SeqCst);
        if call < self.empty_shipment_responses {
            return Ok(Vec::new());
        }
        Ok(self.shipments.clone())
    }

    async fn list_orders(&self, range: &DateRange) -> Result<Vec<Order>> {
        self.bulk_ranges.lock().await.push(*range);
        Ok(self.bulk_orders.clone())
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        self.order_lookups.lock().await.push(order_id);
        Ok(self.lookup_orders.get(&order_id).cloned())
    }

    async fn list_carriers(&self) -> Result<Vec<Carrier>> {
        Ok(self.carriers.clone())
    }

    async fn list_services(&self, carrier_code: &str) -> Result<Vec<ShippingService>> {
        Ok(self
            .services
            .iter()
            .filter(|s| s.carrier_code == carrier_code)
            .cloned()
            .collect())
    }

    fn base_url(&self) -> &str {
        "memory://"
    }
}
