//! Product Models

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "product_condition", rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    LikeNew,
    Used,
}

impl ProductCondition {
    pub const ALL: [Self; 3] = [Self::New, Self::LikeNew, Self::Used];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::Used => "used",
        }
    }
}

/// Catalog section a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "product_category", rename_all = "snake_case")]
pub enum ProductCategory {
    Nendoroid,
    ScaleFigure,
    Plush,
    Goods,
}

impl ProductCategory {
    pub const ALL: [Self; 4] = [Self::Nendoroid, Self::ScaleFigure, Self::Plush, Self::Goods];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nendoroid => "nendoroid",
            Self::ScaleFigure => "scale_figure",
            Self::Plush => "plush",
            Self::Goods => "goods",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl Display for ProductCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCondition {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "condition",
                value: value.to_owned(),
            })
    }
}

impl Display for ProductCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: value.to_owned(),
            })
    }
}

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
