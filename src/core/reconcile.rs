//! Order reconciliation
//!
//! Bulk order search filters by order date, not ship date, so orders placed
//! well before they shipped fall outside the shipment window. The bulk
//! search runs over a widened window and each order id still unresolved is
//! fetched on its own.

use crate::core::fetch::RemoteFetcher;
use crate::domain::{DateRange, Order, OrderId, OrderMap, Result, Shipment};
use std::collections::BTreeSet;

/// Orders resolved for one batch of shipments
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Every resolved order, keyed by id
    pub orders: OrderMap,

    /// Orders returned by the bulk search
    pub bulk_count: usize,

    /// Orders resolved by individual lookup
    pub backfilled: usize,

    /// Referenced order ids that could not be resolved, ascending
    pub missing: Vec<OrderId>,
}

/// Builds the order map for a batch of shipments
pub struct EntityReconciler<'a> {
    fetcher: &'a RemoteFetcher,
    lookback_days: i64,
}

impl<'a> EntityReconciler<'a> {
    pub fn new(fetcher: &'a RemoteFetcher, lookback_days: i64) -> Self {
        Self {
            fetcher,
            lookback_days,
        }
    }

    /// Window for the bulk order search: the shipment range with its start
    /// moved back by the lookback
    pub fn bulk_window(&self, range: &DateRange) -> DateRange {
        range.widened(self.lookback_days)
    }

    /// Run the bulk order search for a shipment range
    pub async fn fetch_bulk(&self, range: &DateRange) -> Result<Vec<Order>> {
        let window = self.bulk_window(range);
        tracing::debug!(
            window = %window,
            lookback_days = self.lookback_days,
            "Bulk order window"
        );
        self.fetcher.fetch_orders(&window).await
    }

    /// Merge bulk orders and individual lookups for every referenced order
    ///
    /// Lookups run one at a time, in ascending id order, after the bulk
    /// result is known. Unresolved ids are reported, not treated as errors.
    pub async fn reconcile(&self, shipments: &[Shipment], bulk: Vec<Order>) -> Result<Reconciliation> {
        let mut reconciliation = Reconciliation {
            bulk_count: bulk.len(),
            ..Default::default()
        };

        for order in bulk {
            reconciliation.orders.insert(order.order_id, order);
        }

        let referenced: BTreeSet<OrderId> = shipments.iter().map(|s| s.order_id).collect();
        let gaps: Vec<OrderId> = referenced
            .into_iter()
            .filter(|id| !reconciliation.orders.contains_key(id))
            .collect();

        if !gaps.is_empty() {
            tracing::info!(count = gaps.len(), "Looking up orders missing from bulk search");
        }

        for order_id in gaps {
            match self.fetcher.fetch_order(order_id).await? {
                Some(order) => {
                    reconciliation.orders.insert(order_id, order);
                    reconciliation.backfilled += 1;
                }
                None => reconciliation.missing.push(order_id),
            }
        }

        tracing::info!(
            bulk = reconciliation.bulk_count,
            backfilled = reconciliation.backfilled,
            missing = reconciliation.missing.len(),
            "Orders reconciled"
        );

        Ok(reconciliation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::shipstation::InMemorySource;
    use crate::core::retry::RetryPolicies;
    use crate::adapters::shipstation::ShippingSource;
    use crate::domain::{
        Carrier, ShipStationError, ShipexError, ShipmentBuilder, ShipmentItem, ShippingService,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn shipment(id: i64, order_id: i64) -> Shipment {
        ShipmentBuilder::new(id, order_id)
            .item(ShipmentItem::new("A", 1))
            .build()
    }

    #[tokio::test]
    async fn test_bulk_window_is_widened() {
        let source = Arc::new(InMemorySource::new());
        let fetcher = RemoteFetcher::new(source.clone(), RetryPolicies::immediate(1));
        let reconciler = EntityReconciler::new(&fetcher, 30);
        let range = DateRange::parse("2024-02-01", "2024-02-29").unwrap();

        reconciler.fetch_bulk(&range).await.unwrap();

        let windows = source.bulk_ranges().await;
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(windows[0].end, range.end);
    }

    #[tokio::test]
    async fn test_gap_backfilled_by_lookup() {
        let source = Arc::new(
            InMemorySource::new().with_lookup_order(Order::new(OrderId::new(200)).with_customer_id("C2")),
        );
        let fetcher = RemoteFetcher::new(source.clone(), RetryPolicies::immediate(5));
        let reconciler = EntityReconciler::new(&fetcher, 30);

        let shipments = vec![shipment(1, 100), shipment(2, 200), shipment(3, 100)];
        let bulk = vec![Order::new(OrderId::new(100))];

        let result = reconciler.reconcile(&shipments, bulk).await.unwrap();

        assert_eq!(result.bulk_count, 1);
        assert_eq!(result.backfilled, 1);
        assert!(result.missing.is_empty());
        assert!(result.orders.contains_key(&OrderId::new(200)));
        // Orders found in bulk are never looked up individually
        assert_eq!(source.order_lookups().await, vec![OrderId::new(200)]);
    }

    #[tokio::test]
    async fn test_unresolvable_order_reported_missing() {
        let source = Arc::new(InMemorySource::new());
        let fetcher = RemoteFetcher::new(source.clone(), RetryPolicies::immediate(5));
        let reconciler = EntityReconciler::new(&fetcher, 30);

        let shipments = vec![shipment(1, 300), shipment(2, 300)];
        let result = reconciler.reconcile(&shipments, Vec::new()).await.unwrap();

        assert!(result.orders.is_empty());
        assert_eq!(result.missing, vec![OrderId::new(300)]);
        // Distinct ids only: one id, five attempts
        assert_eq!(source.order_lookups().await.len(), 5);
    }

    /// Answers order lookups from `inner`, except `failing`, which errors
    struct FailingLookup {
        failing: OrderId,
        error: fn() -> ShipStationError,
        inner: InMemorySource,
    }

    #[async_trait]
    impl ShippingSource for FailingLookup {
        async fn list_shipments(&self, range: &DateRange) -> Result<Vec<Shipment>> {
            self.inner.list_shipments(range).await
        }
        async fn list_orders(&self, range: &DateRange) -> Result<Vec<Order>> {
            self.inner.list_orders(range).await
        }
        async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
            if order_id == self.failing {
                return Err((self.error)().into());
            }
            self.inner.get_order(order_id).await
        }
        async fn list_carriers(&self) -> Result<Vec<Carrier>> {
            self.inner.list_carriers().await
        }
        async fn list_services(&self, carrier_code: &str) -> Result<Vec<ShippingService>> {
            self.inner.list_services(carrier_code).await
        }
        fn base_url(&self) -> &str {
            "failing://"
        }
    }

    fn failing_lookup(error: fn() -> ShipStationError) -> FailingLookup {
        FailingLookup {
            failing: OrderId::new(200),
            error,
            inner: InMemorySource::new()
                .with_lookup_order(Order::new(OrderId::new(100)))
                .with_lookup_order(Order::new(OrderId::new(300))),
        }
    }

    #[tokio::test]
    async fn test_failed_lookup_skips_only_that_order() {
        let source = Arc::new(failing_lookup(|| {
            ShipStationError::InvalidResponse("bad json".to_string())
        }));
        let fetcher = RemoteFetcher::new(source, RetryPolicies::immediate(5));
        let reconciler = EntityReconciler::new(&fetcher, 30);

        let shipments = vec![shipment(1, 100), shipment(2, 200), shipment(3, 300)];
        let result = reconciler.reconcile(&shipments, Vec::new()).await.unwrap();

        assert_eq!(result.backfilled, 2);
        assert_eq!(result.missing, vec![OrderId::new(200)]);
        assert!(result.orders.contains_key(&OrderId::new(100)));
        assert!(result.orders.contains_key(&OrderId::new(300)));
    }

    #[tokio::test]
    async fn test_client_error_on_lookup_is_skipped() {
        let source = Arc::new(failing_lookup(|| ShipStationError::ClientError {
            status: 400,
            message: "bad request".to_string(),
        }));
        let fetcher = RemoteFetcher::new(source, RetryPolicies::immediate(5));
        let reconciler = EntityReconciler::new(&fetcher, 30);

        let shipments = vec![shipment(1, 200), shipment(2, 300)];
        let result = reconciler.reconcile(&shipments, Vec::new()).await.unwrap();

        assert_eq!(result.missing, vec![OrderId::new(200)]);
        assert_eq!(result.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_credentials_abort_reconciliation() {
        let source = Arc::new(failing_lookup(|| {
            ShipStationError::AuthenticationFailed("401".to_string())
        }));
        let fetcher = RemoteFetcher::new(source, RetryPolicies::immediate(5));
        let reconciler = EntityReconciler::new(&fetcher, 30);

        let shipments = vec![shipment(1, 200)];
        let err = reconciler.reconcile(&shipments, Vec::new()).await.unwrap_err();

        assert!(matches!(
            err,
            ShipexError::ShipStation(ShipStationError::AuthenticationFailed(_))
        ));
    }
}
