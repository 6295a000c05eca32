//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgExecutor, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::{
    domain::products::{
        data::{NewProduct, ProductFilters},
        models::{Product, ProductUuid},
    },
    pagination::PageRequest,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SOFT_DELETE_PRODUCT_SQL: &str = include_str!("sql/soft_delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        filters: &ProductFilters,
        page: PageRequest,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(filters.available_only)
            .bind(filters.category)
            .bind(filters.condition)
            .bind(filters.search_pattern())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(executor)
            .await
    }

    pub(crate) async fn count_products<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        filters: &ProductFilters,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(filters.available_only)
            .bind(filters.category)
            .bind(filters.condition)
            .bind(filters.search_pattern())
            .fetch_one(executor)
            .await
    }

    pub(crate) async fn get_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(executor)
            .await
    }

    pub(crate) async fn get_product_by_slug<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(executor)
            .await
    }

    /// Read a product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(executor)
            .await
    }

    pub(crate) async fn create_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.slug)
            .bind(&product.description)
            .bind(product.price_cents)
            .bind(product.condition)
            .bind(product.category)
            .bind(&product.image_url)
            .bind(product.is_available)
            .bind(product.quantity)
            .fetch_one(executor)
            .await
    }

    /// Write every mutable column of `product` back to its row.
    pub(crate) async fn update_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.slug)
            .bind(&product.description)
            .bind(product.price_cents)
            .bind(product.condition)
            .bind(product.category)
            .bind(&product.image_url)
            .bind(product.is_available)
            .bind(product.quantity)
            .fetch_one(executor)
            .await
    }

    pub(crate) async fn soft_delete_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(SOFT_DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(executor)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            price_cents: row.try_get("price_cents")?,
            condition: row.try_get("condition")?,
            category: row.try_get("category")?,
            image_url: row.try_get("image_url")?,
            is_available: row.try_get("is_available")?,
            quantity: row.try_get("quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
