//! Structured order rendering for programmatic submission.

use rust_decimal::Decimal;
use serde::Serialize;

use speedparts_core::ProductId;

use crate::checkout::Order;

/// Wire form of a finalized order, POSTed to the remote submission
/// endpoint as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    /// Customer contact block.
    pub customer: CustomerPayload,
    /// Delivery block.
    pub delivery: DeliveryPayload,
    /// Free-text notes; empty when the customer left none.
    pub notes: String,
    /// Snapshotted line items.
    pub items: Vec<ItemPayload>,
    /// Order total.
    pub total: Decimal,
}

/// Customer contact block.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerPayload {
    pub name: String,
    pub phone: String,
}

/// Delivery block; pickup carries the `N/A` address sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryPayload {
    pub method: String,
    pub address: String,
}

/// A snapshotted order line.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPayload {
    pub id: ProductId,
    pub name: String,
    pub part_number: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl From<&Order> for OrderPayload {
    fn from(order: &Order) -> Self {
        Self {
            customer: CustomerPayload {
                name: order.customer_name.clone(),
                phone: order.customer_phone.clone(),
            },
            delivery: DeliveryPayload {
                method: order.delivery.method().to_string(),
                address: order.delivery.address_or_sentinel().to_string(),
            },
            notes: order.notes.clone().unwrap_or_default(),
            items: order
                .lines
                .iter()
                .map(|line| ItemPayload {
                    id: line.id,
                    name: line.name.clone(),
                    part_number: line.part_number.clone(),
                    quantity: line.quantity,
                    price: line.unit_price.amount(),
                })
                .collect(),
            total: order.total,
        }
    }
}
