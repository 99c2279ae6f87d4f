//! Remote reads with retry policies applied
//!
//! [`RemoteFetcher`] wraps a [`ShippingSource`] and decides, per call, how
//! failures and empty answers are retried and what happens when retries run
//! out.

use crate::adapters::shipstation::ShippingSource;
use crate::core::retry::RetryPolicies;
use crate::domain::{
    Carrier, DateRange, Order, OrderId, Result, ShipStationError, ShipexError, Shipment,
    ShippingService,
};
use futures::future::try_join_all;
use std::sync::Arc;

/// Retrying front for a shipping source
pub struct RemoteFetcher {
    source: Arc<dyn ShippingSource>,
    policies: RetryPolicies,
}

impl RemoteFetcher {
    pub fn new(source: Arc<dyn ShippingSource>, policies: RetryPolicies) -> Self {
        Self { source, policies }
    }

    pub fn policies(&self) -> &RetryPolicies {
        &self.policies
    }

    /// Shipments shipped within `range`
    ///
    /// An empty answer is retried like a transient failure. When the attempts
    /// are used up the result is empty rather than an error.
    pub async fn fetch_shipments(&self, range: &DateRange) -> Result<Vec<Shipment>> {
        let shipments = self
            .policies
            .shipments
            .execute_until(
                "shipment search",
                |_| self.source.list_shipments(range),
                |found: &Vec<Shipment>| !found.is_empty(),
            )
            .await?
            .unwrap_or_default();

        tracing::info!(range = %range, count = shipments.len(), "Shipments fetched");
        Ok(shipments)
    }

    pub async fn fetch_carriers(&self) -> Result<Vec<Carrier>> {
        let carriers = self
            .request("carrier list", |_| self.source.list_carriers())
            .await?;
        tracing::info!(count = carriers.len(), "Carriers fetched");
        Ok(carriers)
    }

    pub async fn fetch_services(&self, carrier_code: &str) -> Result<Vec<ShippingService>> {
        let services = self
            .request("service list", |_| self.source.list_services(carrier_code))
            .await?;
        tracing::debug!(carrier = %carrier_code, count = services.len(), "Services fetched");
        Ok(services)
    }

    /// Services of every carrier, requested concurrently
    pub async fn fetch_all_services(&self, carriers: &[Carrier]) -> Result<Vec<ShippingService>> {
        let per_carrier =
            try_join_all(carriers.iter().map(|c| self.fetch_services(&c.code))).await?;
        let services: Vec<ShippingService> = per_carrier.into_iter().flatten().collect();
        tracing::info!(count = services.len(), "Carrier services fetched");
        Ok(services)
    }

    /// Orders placed within `range`
    pub async fn fetch_orders(&self, range: &DateRange) -> Result<Vec<Order>> {
        let orders = self
            .request("order search", |_| self.source.list_orders(range))
            .await?;
        tracing::info!(range = %range, count = orders.len(), "Orders fetched");
        Ok(orders)
    }

    /// One order by id, `None` once its lookup attempts are exhausted
    ///
    /// A lookup that fails for any reason other than rejected credentials is
    /// skipped as well, so one bad order never aborts the batch.
    pub async fn fetch_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        let outcome = self
            .policies
            .order_lookup
            .execute_until(
                "order lookup",
                |_| self.source.get_order(order_id),
                |found: &Option<Order>| found.is_some(),
            )
            .await;

        let order = match outcome {
            Ok(order) => order.flatten(),
            Err(e @ ShipexError::ShipStation(ShipStationError::AuthenticationFailed(_))) => {
                return Err(e)
            }
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Order lookup failed");
                None
            }
        };

        if order.is_none() {
            tracing::warn!(order_id = %order_id, "Order lookup skipped");
        }
        Ok(order)
    }

    async fn request<T, F, Fut>(&self, operation: &str, op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        self.policies
            .request
            .execute(operation, op)
            .await?
            .ok_or_else(|| ShipexError::Export(format!("{operation} was skipped")))
    }
}
