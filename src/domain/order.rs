//! Order domain model

use super::ids::OrderId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The customer-facing fields of a ShipStation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// ShipStation order id
    pub order_id: OrderId,

    /// Customer id (absent for guest checkouts)
    pub customer_id: Option<String>,

    /// Customer email
    pub customer_email: Option<String>,
}

impl Order {
    /// Create an order with no customer details
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: None,
            customer_email: None,
        }
    }

    /// Set the customer id
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Set the customer email
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }
}

/// Orders resolved for a run, keyed by order id
pub type OrderMap = HashMap<OrderId, Order>;
