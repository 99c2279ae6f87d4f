//! ShipStation REST client
//!
//! Implements [`ShippingSource`] against the ShipStation v1 API using basic
//! authentication. List endpoints are paged; every page is fetched before a
//! list is returned.

use super::models::{
    CarrierDto, OrderDto, OrdersPage, Paged, ServiceDto, ShipmentsPage,
};
use super::ShippingSource;
use crate::config::ShipStationConfig;
use crate::domain::{
    Carrier, DateRange, Order, OrderId, Result, ShipStationError, ShipexError, Shipment,
    ShippingService,
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;

const RATE_LIMIT_RESET_HEADER: &str = "X-Rate-Limit-Reset";

/// ShipStation API client
///
/// # Example
///
/// ```no_run
/// use shipex::adapters::shipstation::ShipStationClient;
/// use shipex::config::ShipStationConfig;
///
/// let client = ShipStationClient::new(ShipStationConfig::default()).unwrap();
/// ```
pub struct ShipStationClient {
    base_url: String,
    client: Client,
    auth_header: String,
    page_size: u32,
}

impl ShipStationClient {
    /// Create a client from configuration
    pub fn new(config: ShipStationConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ShipexError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let credentials = format!(
            "{}:{}",
            config.api_key.expose_secret().as_ref(),
            config.api_secret.expose_secret().as_ref()
        );
        let auth_header = format!(
            "Basic {}",
            general_purpose::STANDARD.encode(credentials.as_bytes())
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            auth_header,
            page_size: config.page_size,
        })
    }

    /// Issue a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, path).await?;

        response.json::<T>().await.map_err(|e| {
            ShipexError::ShipStation(ShipStationError::InvalidResponse(format!(
                "Failed to decode {path} response: {e}"
            )))
        })
    }

    /// Fetch every page of a paged endpoint
    async fn get_all_pages<P, T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        items: impl Fn(P) -> Vec<T>,
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned + Paged,
    {
        let mut collected = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut page_query = query.to_vec();
            page_query.push(("page", page.to_string()));
            page_query.push(("pageSize", self.page_size.to_string()));

            let body: P = self.get_json(path, &page_query).await?;
            let (served, pages) = (body.page(), body.pages());
            collected.extend(items(body));

            tracing::debug!(path = %path, page = served, pages = pages, "Fetched page");

            if page >= pages {
                break;
            }
            page += 1;
        }

        Ok(collected)
    }
}

#[async_trait]
impl ShippingSource for ShipStationClient {
    async fn list_shipments(&self, range: &DateRange) -> Result<Vec<Shipment>> {
        let query = [
            ("shipDateStart", range.start.to_string()),
            ("shipDateEnd", range.end.to_string()),
            ("includeShipmentItems", "true".to_string()),
        ];

        self.get_all_pages("/shipments", &query, |page: ShipmentsPage| {
            page.shipments.into_iter().map(Shipment::from).collect()
        })
        .await
    }

    async fn list_orders(&self, range: &DateRange) -> Result<Vec<Order>> {
        let query = [
            ("orderDateStart", range.start.to_string()),
            ("orderDateEnd", range.end.to_string()),
        ];

        self.get_all_pages("/orders", &query, |page: OrdersPage| {
            page.orders.into_iter().map(Order::from).collect()
        })
        .await
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        let path = format!("/orders/{order_id}");
        match self.get_json::<OrderDto>(&path, &[]).await {
            Ok(dto) => Ok(Some(Order::from(dto))),
            Err(ShipexError::ShipStation(ShipStationError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_carriers(&self) -> Result<Vec<Carrier>> {
        let carriers: Vec<CarrierDto> = self.get_json("/carriers", &[]).await?;
        Ok(carriers.into_iter().map(Carrier::from).collect())
    }

    async fn list_services(&self, carrier_code: &str) -> Result<Vec<ShippingService>> {
        let query = [("carrierCode", carrier_code.to_string())];
        let services: Vec<ServiceDto> = self
            .get_json("/carriers/listservices", &query)
            .await?;
        Ok(services.into_iter().map(ShippingService::from).collect())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn map_transport_error(e: reqwest::Error) -> ShipexError {
    if e.is_timeout() {
        ShipexError::ShipStation(ShipStationError::Timeout(e.to_string()))
    } else {
        ShipexError::ShipStation(ShipStationError::ConnectionFailed(e.to_string()))
    }
}

/// Map a non-success status to a `ShipStationError`
async fn check_status(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reset = response
        .headers()
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| format!("{v}s"))
        .unwrap_or_else(|| "unknown".to_string());
    let body = response.text().await.unwrap_or_default();

    let error = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ShipStationError::AuthenticationFailed(format!("{status} on {path}"))
        }
        StatusCode::NOT_FOUND => ShipStationError::NotFound(path.to_string()),
        StatusCode::TOO_MANY_REQUESTS => ShipStationError::RateLimited(reset),
        s if s.is_server_error() => ShipStationError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => ShipStationError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    };

    Err(ShipexError::ShipStation(error))
}
