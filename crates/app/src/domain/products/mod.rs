//! Products

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use data::{NewProduct, ProductFilters, ProductPatch, apply_patch};
pub use errors::ProductsServiceError;
pub use models::{Product, ProductCategory, ProductCondition, ProductUuid};
pub use service::*;
