//! Shipping source trait definition
//!
//! `ShippingSource` abstracts the five read operations the export depends on.
//! Implementations drain pagination before returning a list.

use crate::domain::{Carrier, DateRange, Order, OrderId, Result, Shipment, ShippingService};
use async_trait::async_trait;

/// Read-only access to a shipping-management API
///
/// # Example
///
/// ```no_run
/// use shipex::adapters::shipstation::{ShipStationClient, ShippingSource};
/// use shipex::config::ShipStationConfig;
/// use shipex::domain::DateRange;
///
/// # async fn example() -> shipex::domain::Result<()> {
/// let client = ShipStationClient::new(ShipStationConfig::default())?;
/// let range = DateRange::parse("2024-02-01", "2024-02-29")
///     .map_err(shipex::domain::ShipexError::Validation)?;
/// let shipments = client.list_shipments(&range).await?;
/// println!("Found {} shipments", shipments.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ShippingSource: Send + Sync {
    /// Shipments whose ship date falls inside `range`, with line items
    async fn list_shipments(&self, range: &DateRange) -> Result<Vec<Shipment>>;

    /// Orders whose order (placement) date falls inside `range`
    async fn list_orders(&self, range: &DateRange) -> Result<Vec<Order>>;

    /// A single order, `None` if the API reports it does not exist
    async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Carriers connected to the account
    async fn list_carriers(&self) -> Result<Vec<Carrier>>;

    /// Services offered by one carrier
    async fn list_services(&self, carrier_code: &str) -> Result<Vec<ShippingService>>;

    /// Base URL, for log context
    fn base_url(&self) -> &str;
}
