//! Product request bodies.

use salvo::oapi::ToSchema;
use serde::Deserialize;

use wisteria_app::{
    domain::products::{NewProduct, ProductCategory, ProductCondition, ProductPatch, ProductUuid},
    patch::Patch,
};

/// Create Product Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    /// Lowercase alphanumeric segments joined by single hyphens
    pub slug: String,

    pub description: String,

    /// Price in cents, at least 1
    pub price_cents: i64,

    #[salvo(schema(value_type = String))]
    pub condition: ProductCondition,

    #[salvo(schema(value_type = String))]
    pub category: ProductCategory,

    pub image_url: String,

    /// Defaults to `true`
    #[serde(default = "available_by_default")]
    pub is_available: bool,

    /// Defaults to 1
    #[serde(default = "one_in_stock")]
    pub quantity: i64,
}

const fn available_by_default() -> bool {
    true
}

const fn one_in_stock() -> i64 {
    1
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            name: request.name,
            slug: request.slug,
            description: request.description,
            price_cents: request.price_cents,
            condition: request.condition,
            category: request.category,
            image_url: request.image_url,
            is_available: request.is_available,
            quantity: request.quantity,
        }
    }
}

/// Update Product Request
///
/// Every field is optional. Omitted fields keep their current value; unknown
/// fields and explicit `null` values are rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct UpdateProductRequest {
    #[salvo(schema(value_type = Option<String>))]
    pub name: Patch<String>,

    #[salvo(schema(value_type = Option<String>))]
    pub slug: Patch<String>,

    #[salvo(schema(value_type = Option<String>))]
    pub description: Patch<String>,

    #[salvo(schema(value_type = Option<i64>))]
    pub price_cents: Patch<i64>,

    #[salvo(schema(value_type = Option<String>))]
    pub condition: Patch<ProductCondition>,

    #[salvo(schema(value_type = Option<String>))]
    pub category: Patch<ProductCategory>,

    #[salvo(schema(value_type = Option<String>))]
    pub image_url: Patch<String>,

    #[salvo(schema(value_type = Option<bool>))]
    pub is_available: Patch<bool>,

    #[salvo(schema(value_type = Option<i64>))]
    pub quantity: Patch<i64>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(request: UpdateProductRequest) -> Self {
        ProductPatch {
            name: request.name,
            slug: request.slug,
            description: request.description,
            price_cents: request.price_cents,
            condition: request.condition,
            category: request.category,
            image_url: request.image_url,
            is_available: request.is_available,
            quantity: request.quantity,
        }
    }
}
