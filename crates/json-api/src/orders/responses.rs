//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use wisteria_app::domain::orders::{Order, OrderItem, OrderStatus};

/// Order Item Response
///
/// Name and price are a snapshot taken when the order was placed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub id: Uuid,
    pub order_id: Uuid,

    /// Originating product, `null` once that product is gone
    pub product_id: Option<Uuid>,

    pub product_name: String,
    pub price_cents: i64,
    pub quantity: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            order_id: item.order_uuid.into_uuid(),
            product_id: item.product_uuid.map(|product| product.into_uuid()),
            product_name: item.product_name,
            price_cents: item.price_cents,
            quantity: item.quantity,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub customer_email: String,
    pub customer_name: String,
    pub stripe_checkout_session_id: String,
    pub stripe_payment_intent_id: Option<String>,

    /// One of `pending`, `paid`, `shipped`, `cancelled`
    #[salvo(schema(value_type = String))]
    pub status: OrderStatus,

    pub total_cents: i64,

    #[salvo(schema(value_type = Object))]
    pub shipping_address: Value,

    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.uuid.into_uuid(),
            customer_email: order.customer_email,
            customer_name: order.customer_name,
            stripe_checkout_session_id: order.stripe_checkout_session_id,
            stripe_payment_intent_id: order.stripe_payment_intent_id,
            status: order.status,
            total_cents: order.total_cents,
            shipping_address: order.shipping_address,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
