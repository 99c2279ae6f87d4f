//! ShipStation API wire models
//!
//! These mirror the JSON returned by the ShipStation v1 REST API and are
//! converted to domain types at the adapter boundary.

use crate::domain::{
    Carrier, Order, OrderId, ShipTo, Shipment, ShipmentId, ShipmentItem, ShippingService,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// One page of `GET /shipments`
#[derive(Debug, Deserialize)]
pub struct ShipmentsPage {
    #[serde(default)]
    pub shipments: Vec<ShipmentDto>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

/// One page of `GET /orders`
#[derive(Debug, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<OrderDto>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

/// Common pagination accessors
pub trait Paged {
    /// Current page number (1-based)
    fn page(&self) -> u32;
    /// Total page count
    fn pages(&self) -> u32;
}

impl Paged for ShipmentsPage {
    fn page(&self) -> u32 {
        self.page
    }
    fn pages(&self) -> u32 {
        self.pages
    }
}

impl Paged for OrdersPage {
    fn page(&self) -> u32 {
        self.page
    }
    fn pages(&self) -> u32 {
        self.pages
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDto {
    pub shipment_id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub ship_date: Option<String>,
    #[serde(default)]
    pub shipment_cost: Option<f64>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub carrier_code: Option<String>,
    #[serde(default)]
    pub service_code: Option<String>,
    #[serde(default)]
    pub voided: bool,
    #[serde(default)]
    pub ship_to: Option<AddressDto>,
    #[serde(default)]
    pub shipment_items: Option<Vec<ShipmentItemDto>>,
}

#[derive(Debug, Deserialize)]
pub struct AddressDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShipmentItemDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i64,
    #[serde(default)]
    pub customer_id: Option<serde_json::Value>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CarrierDto {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub carrier_code: String,
    pub code: String,
    pub name: String,
}

impl From<ShipmentDto> for Shipment {
    fn from(dto: ShipmentDto) -> Self {
        let ship_to = dto
            .ship_to
            .map(|a| ShipTo {
                name: non_empty(a.name),
                phone: non_empty(a.phone),
                country: non_empty(a.country),
            })
            .unwrap_or_default();

        let items = dto
            .shipment_items
            .unwrap_or_default()
            .into_iter()
            .map(|i| ShipmentItem {
                name: i.name,
                quantity: i.quantity.unwrap_or(0),
                sku: non_empty(i.sku),
            })
            .collect();

        Shipment {
            shipment_id: ShipmentId::new(dto.shipment_id),
            order_id: OrderId::new(dto.order_id),
            tracking_number: non_empty(dto.tracking_number),
            create_date: dto.create_date.as_deref().and_then(parse_api_date),
            ship_date: dto.ship_date.as_deref().and_then(parse_api_date),
            carrier_code: non_empty(dto.carrier_code),
            service_code: non_empty(dto.service_code),
            shipment_cost: dto.shipment_cost.unwrap_or(0.0),
            voided: dto.voided,
            ship_to,
            items,
        }
    }
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let customer_id = match dto.customer_id {
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };

        Order {
            order_id: OrderId::new(dto.order_id),
            customer_id,
            customer_email: non_empty(dto.customer_email),
        }
    }
}

impl From<CarrierDto> for Carrier {
    fn from(dto: CarrierDto) -> Self {
        Carrier::new(dto.code, dto.name)
    }
}

impl From<ServiceDto> for ShippingService {
    fn from(dto: ServiceDto) -> Self {
        ShippingService::new(dto.carrier_code, dto.code, dto.name)
    }
}

/// Parse the date part of a ShipStation timestamp
///
/// Accepts `2024-02-01`, `2024-02-01T08:45:22.0970000` and RFC 3339.
pub fn parse_api_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    tracing::warn!(value = %value, "Unparseable date from ShipStation");
    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_api_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 1);
        assert_eq!(parse_api_date("2024-02-01"), expected);
        assert_eq!(parse_api_date("2024-02-01T08:45:22.0970000"), expected);
        assert_eq!(parse_api_date("2024-02-01T08:45:22"), expected);
        assert_eq!(parse_api_date("2024-02-01T08:45:22-07:00"), expected);
        assert_eq!(parse_api_date(""), None);
        assert_eq!(parse_api_date("yesterday"), None);
    }

    #[test]
    fn test_shipment_dto_conversion() {
        let dto: ShipmentDto = serde_json::from_value(json!({
            "shipmentId": 220275386,
            "orderId": 100,
            "createDate": "2024-02-01T08:45:22.0970000",
            "shipDate": "2024-02-02",
            "shipmentCost": 9.17,
            "trackingNumber": "1Z999",
            "carrierCode": "ups",
            "serviceCode": "",
            "voided": false,
            "shipTo": {"name": "Jane Doe", "phone": null, "country": "CA"},
            "shipmentItems": [
                {"name": "Widget", "quantity": 2, "sku": "A"}
            ]
        }))
        .unwrap();

        let shipment = Shipment::from(dto);
        assert_eq!(shipment.shipment_id.value(), 220275386);
        assert_eq!(shipment.create_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(shipment.carrier_code.as_deref(), Some("ups"));
        assert_eq!(shipment.service_code, None);
        assert_eq!(shipment.ship_to.country.as_deref(), Some("CA"));
        assert_eq!(shipment.items.len(), 1);
        assert_eq!(shipment.items[0].quantity, 2);
    }

    #[test]
    fn test_shipment_without_items() {
        let dto: ShipmentDto = serde_json::from_value(json!({
            "shipmentId": 1,
            "orderId": 2,
            "shipmentItems": null
        }))
        .unwrap();

        let shipment = Shipment::from(dto);
        assert!(shipment.items.is_empty());
        assert!(!shipment.voided);
    }

    #[test]
    fn test_order_customer_id_variants() {
        let numeric: OrderDto =
            serde_json::from_value(json!({"orderId": 1, "customerId": 5551, "customerEmail": "a@b.c"}))
                .unwrap();
        assert_eq!(Order::from(numeric).customer_id.as_deref(), Some("5551"));

        let guest: OrderDto =
            serde_json::from_value(json!({"orderId": 2, "customerId": null})).unwrap();
        let order = Order::from(guest);
        assert_eq!(order.customer_id, None);
        assert_eq!(order.customer_email, None);
    }
}
