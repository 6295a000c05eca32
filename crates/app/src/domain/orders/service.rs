//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, NewOrderItem, OrderStatusUpdate},
            errors::OrdersServiceError,
            models::{Order, OrderItemUuid, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository, ProductSnapshot},
        },
        products::models::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: Order,
    ) -> Result<Order, OrdersServiceError> {
        let items = self.items_repository.get_order_items(tx, order.uuid).await?;

        order.items.extend(items);

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        order.validate()?;

        let mut tx = self.db.begin().await?;

        let requested: Vec<Uuid> = order
            .lines
            .iter()
            .map(|line| line.product.into_uuid())
            .collect();

        let snapshots: FxHashMap<ProductUuid, ProductSnapshot> = self
            .orders_repository
            .snapshot_products(&mut tx, &requested)
            .await?
            .into_iter()
            .map(|snapshot| (snapshot.uuid, snapshot))
            .collect();

        let (items, total_cents) = snapshot_lines(&order, &snapshots)?;

        let mut created = self
            .orders_repository
            .create_order(&mut tx, &order, total_cents)
            .await?;

        for item in &items {
            let stored = self
                .items_repository
                .create_order_item(&mut tx, created.uuid, item)
                .await?;

            created.items.push(stored);
        }

        tx.commit().await?;

        info!(
            order = %created.uuid,
            items = created.items.len(),
            total_cents,
            "created order"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.orders_repository.get_order(&mut tx, order).await?;
        let found = self.with_items(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn find_order_by_session(&self, session_id: &str) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .orders_repository
            .find_order_by_session(&mut tx, session_id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let found = self.with_items(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_order_status(&mut tx, order, &update)
            .await?;

        let updated = self.with_items(&mut tx, updated).await?;

        tx.commit().await?;

        info!(order = %updated.uuid, status = updated.status.as_str(), "updated order status");

        Ok(updated)
    }
}

/// Price every line from the locked product rows and sum the order total.
fn snapshot_lines(
    order: &NewOrder,
    snapshots: &FxHashMap<ProductUuid, ProductSnapshot>,
) -> Result<(Vec<NewOrderItem>, i64), OrdersServiceError> {
    let mut items = Vec::with_capacity(order.lines.len());
    let mut total_cents: i64 = 0;

    for line in &order.lines {
        let snapshot = snapshots
            .get(&line.product)
            .ok_or(OrdersServiceError::UnknownProduct(line.product))?;

        if !snapshot.is_available {
            return Err(OrdersServiceError::ProductUnavailable(line.product));
        }

        total_cents = snapshot
            .price_cents
            .checked_mul(line.quantity)
            .and_then(|line_total| total_cents.checked_add(line_total))
            .ok_or(OrdersServiceError::TotalOverflow)?;

        items.push(NewOrderItem {
            uuid: OrderItemUuid::new(),
            product: line.product,
            product_name: snapshot.name.clone(),
            price_cents: snapshot.price_cents,
            quantity: line.quantity,
        });
    }

    Ok((items, total_cents))
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order, copying each product's current name and price.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve an order and its items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve the order created for a checkout session.
    async fn find_order_by_session(&self, session_id: &str) -> Result<Order, OrdersServiceError>;

    /// Move an order to `update.status`. Item snapshots are never touched.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::{data::NewOrderLine, models::OrderStatus},
            products::{ProductPatch, ProductsService},
        },
        patch::Patch,
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    fn new_order(session_id: &str, lines: Vec<NewOrderLine>) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            customer_email: "buyer@example.com".to_string(),
            customer_name: "Buyer".to_string(),
            stripe_checkout_session_id: session_id.to_string(),
            shipping_address: json!({"line1": "1-1 Chiyoda", "country": "JP"}),
            lines,
        }
    }

    fn line(product: ProductUuid, quantity: i64) -> NewOrderLine {
        NewOrderLine { product, quantity }
    }

    #[test]
    fn snapshot_lines_sums_price_times_quantity() -> TestResult {
        let first = ProductUuid::new();
        let second = ProductUuid::new();

        let snapshots: FxHashMap<ProductUuid, ProductSnapshot> = [
            ProductSnapshot {
                uuid: first,
                name: "Figure".to_string(),
                price_cents: 1500,
                is_available: true,
            },
            ProductSnapshot {
                uuid: second,
                name: "Plush".to_string(),
                price_cents: 250,
                is_available: true,
            },
        ]
        .into_iter()
        .map(|snapshot| (snapshot.uuid, snapshot))
        .collect();

        let order = new_order("cs_1", vec![line(first, 2), line(second, 3)]);

        let (items, total) = snapshot_lines(&order, &snapshots)?;

        assert_eq!(total, 3750);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].product_name, "Plush");

        Ok(())
    }

    #[test]
    fn snapshot_lines_rejects_overflowing_totals() {
        let product = ProductUuid::new();

        let snapshots: FxHashMap<ProductUuid, ProductSnapshot> = [(
            product,
            ProductSnapshot {
                uuid: product,
                name: "Expensive".to_string(),
                price_cents: i64::MAX,
                is_available: true,
            },
        )]
        .into_iter()
        .collect();

        let result = snapshot_lines(&new_order("cs_1", vec![line(product, 2)]), &snapshots);

        assert!(matches!(result, Err(OrdersServiceError::TotalOverflow)));
    }

    #[tokio::test]
    async fn create_order_snapshots_products() -> TestResult {
        let ctx = TestContext::new().await;

        let figure = ctx.products.create_product(new_product("figure", 1500)).await?;
        let plush = ctx.products.create_product(new_product("plush", 250)).await?;

        let order = ctx
            .orders
            .create_order(new_order(
                "cs_test_1",
                vec![line(figure.uuid, 2), line(plush.uuid, 1)],
            ))
            .await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents, 3250);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product_uuid, Some(figure.uuid));
        assert_eq!(order.items[0].product_name, figure.name);
        assert_eq!(order.items[0].line_total(), 3000);
        assert_eq!(order.stripe_payment_intent_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn snapshots_survive_product_changes() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("figure", 1500)).await?;

        let order = ctx
            .orders
            .create_order(new_order("cs_test_1", vec![line(product.uuid, 1)]))
            .await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductPatch {
                    name: Patch::Value("Renamed".to_string()),
                    price_cents: Patch::Value(9999),
                    ..ProductPatch::default()
                },
            )
            .await?;

        let fetched = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(fetched.items[0].product_name, product.name);
        assert_eq!(fetched.items[0].price_cents, 1500);
        assert_eq!(fetched.total_cents, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let missing = ProductUuid::new();

        let result = ctx
            .orders
            .create_order(new_order("cs_test_1", vec![line(missing, 1)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::UnknownProduct(uuid)) if uuid == missing),
            "expected UnknownProduct, got {result:?}"
        );

        let lookup = ctx.orders.find_order_by_session("cs_test_1").await;

        assert!(matches!(lookup, Err(OrdersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("figure", 1500)).await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx
            .orders
            .create_order(new_order("cs_test_1", vec![line(product.uuid, 1)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductUnavailable(_))),
            "expected ProductUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_order_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.create_order(new_order("cs_test_1", vec![])).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_session_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("figure", 1500)).await?;

        ctx.orders
            .create_order(new_order("cs_test_1", vec![line(product.uuid, 1)]))
            .await?;

        let result = ctx
            .orders
            .create_order(new_order("cs_test_1", vec![line(product.uuid, 1)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_order_by_session_returns_items() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("figure", 1500)).await?;

        let created = ctx
            .orders
            .create_order(new_order("cs_test_1", vec![line(product.uuid, 3)]))
            .await?;

        let found = ctx.orders.find_order_by_session("cs_test_1").await?;

        assert_eq!(found, created);

        Ok(())
    }

    #[tokio::test]
    async fn update_order_status_keeps_snapshots() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("figure", 1500)).await?;

        let created = ctx
            .orders
            .create_order(new_order("cs_test_1", vec![line(product.uuid, 1)]))
            .await?;

        let paid = ctx
            .orders
            .update_order_status(
                created.uuid,
                OrderStatusUpdate {
                    status: OrderStatus::Paid,
                    stripe_payment_intent_id: Some("pi_test_1".to_string()),
                },
            )
            .await?;

        assert_eq!(paid.status, OrderStatus::Paid);
        assert_eq!(paid.stripe_payment_intent_id.as_deref(), Some("pi_test_1"));
        assert_eq!(paid.items, created.items);

        let shipped = ctx
            .orders
            .update_order_status(
                created.uuid,
                OrderStatusUpdate {
                    status: OrderStatus::Shipped,
                    stripe_payment_intent_id: None,
                },
            )
            .await?;

        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(
            shipped.stripe_payment_intent_id.as_deref(),
            Some("pi_test_1")
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
