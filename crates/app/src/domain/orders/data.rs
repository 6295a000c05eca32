//! Order Data

use serde_json::Value;

use crate::{
    domain::{
        orders::models::{OrderItemUuid, OrderStatus, OrderUuid},
        products::models::ProductUuid,
    },
    validation::{self, ValidationErrors},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer_email: String,
    pub customer_name: String,
    pub stripe_checkout_session_id: String,
    pub shipping_address: Value,
    pub lines: Vec<NewOrderLine>,
}

/// One requested product and how many of it. Prices are never taken from
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product: ProductUuid,
    pub quantity: i64,
}

impl NewOrder {
    /// # Errors
    ///
    /// Returns every rejected field, including an empty line list.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check("customer_email", validation::email(&self.customer_email));
        errors.check(
            "customer_name",
            validation::length_between(&self.customer_name, 1, 255),
        );
        errors.check(
            "stripe_checkout_session_id",
            validation::length_between(&self.stripe_checkout_session_id, 1, 255),
        );

        if self.lines.is_empty() {
            errors.add("items", "must contain at least 1 item");
        }

        if self
            .lines
            .iter()
            .any(|line| validation::at_least(line.quantity, 1).is_err())
        {
            errors.add("quantity", "must be greater than or equal to 1");
        }

        errors.into_result()
    }
}

/// Snapshot row written for each order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub price_cents: i64,
    pub quantity: i64,
}

/// Order status transition, optionally recording the payment reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    pub stripe_payment_intent_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order() -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            customer_email: "buyer@example.com".to_string(),
            customer_name: "Buyer".to_string(),
            stripe_checkout_session_id: "cs_test_1".to_string(),
            shipping_address: json!({"city": "Osaka"}),
            lines: vec![NewOrderLine {
                product: ProductUuid::new(),
                quantity: 1,
            }],
        }
    }

    #[test]
    fn valid_order_passes() {
        assert!(order().validate().is_ok());
    }

    #[test]
    fn empty_order_is_rejected() {
        let mut empty = order();

        empty.lines.clear();

        let errors = empty.validate().err().unwrap_or_default();

        assert_eq!(errors.errors()[0].field, "items");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut invalid = order();

        invalid.lines[0].quantity = 0;
        invalid.customer_email = "nobody".to_string();

        let errors = invalid.validate().err().unwrap_or_default();
        let fields: Vec<_> = errors.errors().iter().map(|error| error.field).collect();

        assert_eq!(fields, vec!["customer_email", "quantity"]);
    }
}
