//! Orders

pub mod data;
pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use data::{NewOrder, NewOrderLine, OrderStatusUpdate};
pub use errors::OrdersServiceError;
pub use models::{Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid};
pub use service::*;
