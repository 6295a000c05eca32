//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::{
        data::{NewOrder, OrderStatusUpdate},
        models::{Order, OrderUuid},
    },
    products::models::ProductUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const FIND_ORDER_BY_SESSION_SQL: &str = include_str!("../sql/find_order_by_session.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const SNAPSHOT_PRODUCTS_SQL: &str = include_str!("../sql/snapshot_products.sql");

/// The product columns an order line copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProductSnapshot {
    pub uuid: ProductUuid,
    pub name: String,
    pub price_cents: i64,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
        total_cents: i64,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&order.customer_email)
            .bind(&order.customer_name)
            .bind(&order.stripe_checkout_session_id)
            .bind(total_cents)
            .bind(&order.shipping_address)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_order_by_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(FIND_ORDER_BY_SESSION_SQL)
            .bind(session_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        update: &OrderStatusUpdate,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(update.status)
            .bind(update.stripe_payment_intent_id.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read and share-lock the referenced products so their name and price
    /// cannot change before the order commits.
    pub(crate) async fn snapshot_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<Vec<ProductSnapshot>, sqlx::Error> {
        query_as::<Postgres, ProductSnapshot>(SNAPSHOT_PRODUCTS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_email: row.try_get("customer_email")?,
            customer_name: row.try_get("customer_name")?,
            stripe_checkout_session_id: row.try_get("stripe_checkout_session_id")?,
            stripe_payment_intent_id: row.try_get("stripe_payment_intent_id")?,
            status: row.try_get("status")?,
            total_cents: row.try_get("total_cents")?,
            shipping_address: row.try_get::<Value, _>("shipping_address")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSnapshot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price_cents: row.try_get("price_cents")?,
            is_available: row.try_get("is_available")?,
        })
    }
}
