//! Test Helpers

use crate::domain::products::{NewProduct, ProductCategory, ProductCondition, ProductUuid};

/// A valid product with the given slug and price; other fields are filler.
pub(crate) fn new_product(slug: &str, price_cents: i64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: format!("Product {slug}"),
        slug: slug.to_string(),
        description: "A test product.".to_string(),
        price_cents,
        condition: ProductCondition::New,
        category: ProductCategory::Nendoroid,
        image_url: format!("https://images.example.com/{slug}.jpg"),
        is_available: true,
        quantity: 1,
    }
}
