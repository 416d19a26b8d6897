//! Payment business logic - Records money received against existing orders.
//!
//! A payment is only written after an explicit check that its order exists.
//! An order ID or amount of zero counts as missing input.

use crate::{
    core::input::{parse_integer, parse_real},
    entities::{Order, Payment, payment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;
use tracing::{info, instrument};

/// One line of the payment listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    /// Payment identity
    pub id: i64,
    /// Settled order
    pub order_id: i64,
    /// Amount, unrounded
    pub amount: f64,
}

impl From<payment::Model> for PaymentRow {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            amount: model.amount,
        }
    }
}

impl fmt::Display for PaymentRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payment ID: {}, Order ID: {}, Amount: ${:.2}",
            self.id, self.order_id, self.amount
        )
    }
}

/// Records a payment from raw form input.
///
/// # Errors
/// Returns an error if:
/// - The order ID is not an integer or the amount is not a finite number (format)
/// - Either value is zero (validation)
/// - No order with that ID exists (reference)
/// - The database insert fails
#[instrument(skip(db))]
pub async fn record_payment(
    db: &DatabaseConnection,
    order_ref: &str,
    amount: &str,
) -> Result<payment::Model> {
    let order_id = parse_integer("Order ID", order_ref)?;
    let amount = parse_real("Amount", amount)?;

    if order_id == 0 || amount == 0.0 {
        return Err(Error::validation("Order ID and amount are required"));
    }

    if Order::find_by_id(order_id).one(db).await?.is_none() {
        return Err(Error::Reference {
            entity: "Order",
            id: order_id,
        });
    }

    let payment = payment::ActiveModel {
        order_id: Set(order_id),
        amount: Set(amount),
        ..Default::default()
    };
    let created = payment.insert(db).await?;
    info!(payment_id = created.id, order_id, "Payment recorded");
    Ok(created)
}

/// Lists all payments in insertion order.
pub async fn list_payments(db: &DatabaseConnection) -> Result<Vec<PaymentRow>> {
    let payments = Payment::find()
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await?;
    Ok(payments.into_iter().map(PaymentRow::from).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_record_payment_format_errors() -> Result<()> {
        let db = setup_test_db().await?;

        let result = record_payment(&db, "one", "5").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Format { field: "Order ID", .. }
        ));

        let result = record_payment(&db, "1", "five").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Format { field: "Amount", .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_treats_zero_as_missing() -> Result<()> {
        let (db, user, product) = setup_with_user_and_product().await?;
        let order = place_test_order(&db, user.id, product.id, 1).await?;

        let result = record_payment(&db, "0", "5").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        let result = record_payment(&db, &order.id.to_string(), "0").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        assert!(list_payments(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_for_missing_order() -> Result<()> {
        let db = setup_test_db().await?;

        let result = record_payment(&db, "999", "10").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Reference {
                entity: "Order",
                id: 999
            }
        ));
        assert!(list_payments(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_is_listed() -> Result<()> {
        let (db, user, product) = setup_with_user_and_product().await?;
        let order = place_test_order(&db, user.id, product.id, 3).await?;

        let created = record_payment(&db, &order.id.to_string(), "12.3456").await?;
        assert_eq!(created.amount, 12.3456);

        let payments = list_payments(&db).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, 12.3456);
        assert_eq!(
            payments[0].to_string(),
            format!("Payment ID: {}, Order ID: {}, Amount: $12.35", created.id, order.id)
        );
        Ok(())
    }
}
