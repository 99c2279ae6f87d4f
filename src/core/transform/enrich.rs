//! Flattening of reconciled shipments into export records

use crate::domain::{CarrierLookup, OrderMap, OutputRecord, Shipment};
use crate::log_record_skipped;

/// Records produced by one enrichment pass plus exclusion counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichOutcome {
    pub records: Vec<OutputRecord>,
    pub voided: usize,
    pub order_missing: usize,
    pub items_missing: usize,
}

impl EnrichOutcome {
    /// Shipments excluded for any reason
    pub fn skipped(&self) -> usize {
        self.voided + self.order_missing + self.items_missing
    }
}

/// Projects shipment, order, carrier and service data into [`OutputRecord`]s
///
/// # Example
///
/// ```rust
/// use shipex::core::transform::RecordEnricher;
/// use shipex::domain::{
///     Carrier, CarrierLookup, Order, OrderId, OrderMap, ShipmentBuilder, ShipmentItem,
/// };
///
/// let mut orders = OrderMap::new();
/// orders.insert(OrderId::new(100), Order::new(OrderId::new(100)).with_customer_id("C1"));
/// let lookup = CarrierLookup::new(vec![Carrier::new("ups", "UPS Inc")], vec![]);
///
/// let shipment = ShipmentBuilder::new(1, 100)
///     .carrier_code("ups")
///     .item(ShipmentItem::new("A", 2))
///     .build();
///
/// let outcome = RecordEnricher::new(&orders, &lookup).enrich(&[shipment]);
/// assert_eq!(outcome.records.len(), 1);
/// assert_eq!(outcome.records[0].carrier, "UPS Inc");
/// ```
pub struct RecordEnricher<'a> {
    orders: &'a OrderMap,
    lookup: &'a CarrierLookup,
}

impl<'a> RecordEnricher<'a> {
    pub fn new(orders: &'a OrderMap, lookup: &'a CarrierLookup) -> Self {
        Self { orders, lookup }
    }

    /// One record per line item of every kept shipment, in input order
    ///
    /// A shipment is dropped if it is voided, if its order did not resolve,
    /// or if it has no line items, checked in that order.
    pub fn enrich(&self, shipments: &[Shipment]) -> EnrichOutcome {
        let mut outcome = EnrichOutcome::default();

        for shipment in shipments {
            if shipment.voided {
                log_record_skipped!(shipment.shipment_id, shipment.order_id, "voided");
                outcome.voided += 1;
                continue;
            }

            let Some(order) = self.orders.get(&shipment.order_id) else {
                log_record_skipped!(shipment.shipment_id, shipment.order_id, "order-not-found");
                outcome.order_missing += 1;
                continue;
            };

            if shipment.items.is_empty() {
                log_record_skipped!(shipment.shipment_id, shipment.order_id, "items-missing");
                outcome.items_missing += 1;
                continue;
            }

            let carrier = self.lookup.carrier_name(shipment.carrier_code.as_deref());
            let service = self.lookup.service_name(shipment.service_code.as_deref());

            for item in &shipment.items {
                outcome.records.push(OutputRecord {
                    print_date: shipment.create_date,
                    ship_id: shipment.shipment_id,
                    order_id: shipment.order_id,
                    items: item.name.clone(),
                    qty: item.quantity,
                    ship_date: shipment.ship_date,
                    name: shipment.ship_to.name.clone(),
                    id: order.customer_id.clone(),
                    phone: shipment.ship_to.phone.clone(),
                    email: order.customer_email.clone(),
                    tracking: shipment.tracking_number.clone(),
                    carrier: carrier.to_string(),
                    service: service.to_string(),
                    country: shipment.ship_to.country.clone(),
                    cost: shipment.shipment_cost,
                    sku: item.sku.clone(),
                    zone: None,
                });
            }
        }

        tracing::info!(
            shipments = shipments.len(),
            records = outcome.records.len(),
            voided = outcome.voided,
            order_missing = outcome.order_missing,
            items_missing = outcome.items_missing,
            "Records enriched"
        );

        outcome
    }
}
