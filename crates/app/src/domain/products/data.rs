//! Products Data

use serde::Deserialize;

use crate::{
    domain::products::models::{Product, ProductCategory, ProductCondition, ProductUuid},
    patch::Patch,
    validation::{self, ValidationErrors},
};

const NAME_MAX: usize = 255;
const IMAGE_URL_MAX: usize = 2048;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub condition: ProductCondition,
    pub category: ProductCategory,
    pub image_url: String,
    pub is_available: bool,
    pub quantity: i64,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns every rejected field at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check("name", name(&self.name));
        errors.check("slug", validation::slug(&self.slug));
        errors.check("description", description(&self.description));
        errors.check("price_cents", price_cents(self.price_cents));
        errors.check("image_url", image_url(&self.image_url));
        errors.check("quantity", quantity(self.quantity));

        errors.into_result()
    }
}

/// Conjunctive listing filters. Every `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub available_only: bool,
    pub category: Option<ProductCategory>,
    pub condition: Option<ProductCondition>,
    pub search: Option<String>,
}

impl ProductFilters {
    /// Filters for anonymous callers, who only ever see available products.
    #[must_use]
    pub fn public(
        category: Option<ProductCategory>,
        condition: Option<ProductCondition>,
        search: Option<String>,
    ) -> Self {
        Self {
            available_only: true,
            category,
            condition,
            search,
        }
    }

    /// The search term as a literal `ILIKE` pattern body, or `None` when
    /// there is nothing to search for.
    pub(crate) fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(escape_like)
    }
}

/// Sparse product update. Keys missing from the payload stay [`Patch::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Patch<String>,
    pub slug: Patch<String>,
    pub description: Patch<String>,
    pub price_cents: Patch<i64>,
    pub condition: Patch<ProductCondition>,
    pub category: Patch<ProductCategory>,
    pub image_url: Patch<String>,
    pub is_available: Patch<bool>,
    pub quantity: Patch<i64>,
}

impl ProductPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.slug.is_absent()
            && self.description.is_absent()
            && self.price_cents.is_absent()
            && self.condition.is_absent()
            && self.category.is_absent()
            && self.image_url.is_absent()
            && self.is_available.is_absent()
            && self.quantity.is_absent()
    }

    /// # Errors
    ///
    /// Returns every rejected field. Explicit `null` is rejected for all
    /// fields since none of them are nullable.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check("name", patched(&self.name, |value| name(value)));
        errors.check("slug", patched(&self.slug, |value| validation::slug(value)));
        errors.check(
            "description",
            patched(&self.description, |value| description(value)),
        );
        errors.check(
            "price_cents",
            patched(&self.price_cents, |value| price_cents(*value)),
        );
        errors.check("condition", patched(&self.condition, |_| Ok(())));
        errors.check("category", patched(&self.category, |_| Ok(())));
        errors.check(
            "image_url",
            patched(&self.image_url, |value| image_url(value)),
        );
        errors.check("is_available", patched(&self.is_available, |_| Ok(())));
        errors.check("quantity", patched(&self.quantity, |value| quantity(*value)));

        errors.into_result()
    }
}

/// Apply `patch` to `product`, validating every field before touching any.
///
/// The mutation timestamp is left alone; storage refreshes it on write.
///
/// # Errors
///
/// Returns the rejected fields; `product` is dropped unchanged in that case.
pub fn apply_patch(mut product: Product, patch: ProductPatch) -> Result<Product, ValidationErrors> {
    patch.validate()?;

    let ProductPatch {
        name,
        slug,
        description,
        price_cents,
        condition,
        category,
        image_url,
        is_available,
        quantity,
    } = patch;

    name.apply_to(&mut product.name);
    slug.apply_to(&mut product.slug);
    description.apply_to(&mut product.description);
    price_cents.apply_to(&mut product.price_cents);
    condition.apply_to(&mut product.condition);
    category.apply_to(&mut product.category);
    image_url.apply_to(&mut product.image_url);
    is_available.apply_to(&mut product.is_available);
    quantity.apply_to(&mut product.quantity);

    Ok(product)
}

fn patched<T>(patch: &Patch<T>, rule: impl FnOnce(&T) -> Result<(), String>) -> Result<(), String> {
    match patch {
        Patch::Absent => Ok(()),
        Patch::Null => Err("must not be null".to_string()),
        Patch::Value(value) => rule(value),
    }
}

fn name(value: &str) -> Result<(), String> {
    validation::length_between(value, 1, NAME_MAX)
}

fn description(value: &str) -> Result<(), String> {
    validation::length_between(value, 1, usize::MAX)
}

fn image_url(value: &str) -> Result<(), String> {
    validation::length_between(value, 1, IMAGE_URL_MAX)
}

fn price_cents(value: i64) -> Result<(), String> {
    validation::at_least(value, 1)
}

fn quantity(value: i64) -> Result<(), String> {
    validation::at_least(value, 0)
}

/// Escape `LIKE` metacharacters so the term only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for character in term.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(character);
    }

    escaped
}
