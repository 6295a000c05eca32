//! Product response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wisteria_app::{
    domain::products::{Product, ProductCategory, ProductCondition},
    pagination::Page,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,

    /// Price in cents
    pub price_cents: i64,

    /// One of `new`, `like_new`, `used`
    #[salvo(schema(value_type = String))]
    pub condition: ProductCondition,

    /// One of `nendoroid`, `scale_figure`, `plush`, `goods`
    #[salvo(schema(value_type = String))]
    pub category: ProductCategory,

    pub image_url: String,
    pub is_available: bool,
    pub quantity: i64,

    /// RFC 3339 timestamp
    pub created_at: String,

    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            price_cents: product.price_cents,
            condition: product.condition,
            category: product.category,
            image_url: product.image_url,
            is_available: product.is_available,
            quantity: product.quantity,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Paginated Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsPageResponse {
    pub items: Vec<ProductResponse>,

    /// Matching products across every page
    pub total: u64,

    pub page: u32,
    pub per_page: u32,

    /// Page count, at least one
    pub pages: u64,
}

impl From<Page<Product>> for ProductsPageResponse {
    fn from(page: Page<Product>) -> Self {
        let pages = page.pages();
        let page = page.map(ProductResponse::from);

        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            pages,
        }
    }
}
