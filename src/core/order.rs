//! Order business logic - The two-phase staging and placement workflow.
//!
//! Lines are first collected in an [`OrderDraft`] without touching storage.
//! [`place_order`] then writes every staged line inside one database
//! transaction: each line's user and product are checked for existence before
//! its insert, and the first failure rolls the whole batch back. The draft is
//! cleared only after a successful commit.
//!
//! Staged lines are kept as structured values. Their display text is for
//! rendering only and is never parsed back.

use crate::{
    core::input::parse_integer,
    entities::{Order, Product, User, order, product, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// A staged, uncommitted order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    /// Selected user identity
    pub user_id: i64,
    /// Selected product identity
    pub product_id: i64,
    /// Units ordered, always positive
    pub quantity: i64,
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User: {}, Product: {}, Quantity: {}",
            self.user_id, self.product_id, self.quantity
        )
    }
}

/// The transient staging list behind the order form.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    lines: Vec<OrderLine>,
}

impl OrderDraft {
    /// Creates an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends a line built from the current selections and the raw quantity.
    ///
    /// No existence check happens here; selections may already be stale.
    ///
    /// # Errors
    /// Returns a format error if a selection is missing or the quantity is not
    /// a positive integer.
    pub fn stage_line(
        &mut self,
        user: Option<i64>,
        product: Option<i64>,
        quantity: &str,
    ) -> Result<OrderLine> {
        let user_id = user.ok_or_else(|| missing_selection("User"))?;
        let product_id = product.ok_or_else(|| missing_selection("Product"))?;

        let not_positive = || Error::Format {
            field: "Quantity",
            value: quantity.to_string(),
            expected: "a positive integer",
        };
        let quantity = parse_integer("Quantity", quantity).map_err(|_| not_positive())?;
        if quantity <= 0 {
            return Err(not_positive());
        }

        let line = OrderLine {
            user_id,
            product_id,
            quantity,
        };
        self.lines.push(line);
        debug!(%line, staged = self.lines.len(), "Order line staged");
        Ok(line)
    }

    /// The staged lines in staging order.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Number of staged lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes the line at a 1-based position.
    ///
    /// # Errors
    /// Returns a selection error if no line exists at that position.
    pub fn remove_line(&mut self, position: usize) -> Result<OrderLine> {
        if position == 0 || position > self.lines.len() {
            return Err(Error::Selection {
                entity: "order line",
            });
        }
        Ok(self.lines.remove(position - 1))
    }

    /// Discards every staged line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

fn missing_selection(field: &'static str) -> Error {
    Error::Format {
        field,
        value: String::new(),
        expected: "a selected entry",
    }
}

/// Commits every staged line as one batch.
///
/// # Errors
/// Returns a validation error if nothing is staged. Any failing line is
/// reported as [`Error::OrderLine`] with its 1-based position; in that case the
/// transaction is rolled back and the draft is left as it was.
#[instrument(skip(db, draft), fields(lines = draft.len()))]
pub async fn place_order(
    db: &DatabaseConnection,
    draft: &mut OrderDraft,
) -> Result<Vec<order::Model>> {
    if draft.is_empty() {
        return Err(Error::validation("No order lines staged"));
    }

    let txn = db.begin().await?;
    let mut placed = Vec::with_capacity(draft.len());

    for (index, line) in draft.lines().iter().enumerate() {
        match insert_line(&txn, line).await {
            Ok(model) => placed.push(model),
            Err(source) => {
                txn.rollback().await?;
                warn!(line = index + 1, error = %source, "Order placement rolled back");
                return Err(Error::OrderLine {
                    line: index + 1,
                    source: Box::new(source),
                });
            }
        }
    }

    txn.commit().await?;
    draft.clear();
    info!(orders = placed.len(), "Order placed");
    Ok(placed)
}

async fn insert_line<C>(db: &C, line: &OrderLine) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    if User::find_by_id(line.user_id).one(db).await?.is_none() {
        return Err(Error::Reference {
            entity: "User",
            id: line.user_id,
        });
    }
    if Product::find_by_id(line.product_id).one(db).await?.is_none() {
        return Err(Error::Reference {
            entity: "Product",
            id: line.product_id,
        });
    }

    order::ActiveModel {
        user_id: Set(line.user_id),
        product_id: Set(line.product_id),
        quantity: Set(line.quantity),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// A selectable entry for the order form, e.g. `"3: Widget"`.
///
/// Choices are a snapshot taken when the form is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Identity of the referenced row
    pub id: i64,
    /// Text shown to the operator
    pub label: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Snapshot of users available to order for.
pub async fn user_choices(db: &DatabaseConnection) -> Result<Vec<Choice>> {
    let users = User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(users
        .into_iter()
        .map(|u| Choice {
            id: u.id,
            label: format!("{}: {}", u.id, u.name),
        })
        .collect())
}

/// Snapshot of products available to order.
pub async fn product_choices(db: &DatabaseConnection) -> Result<Vec<Choice>> {
    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    Ok(products
        .into_iter()
        .map(|p| Choice {
            id: p.id,
            label: format!("{}: {}", p.id, p.name),
        })
        .collect())
}

/// One line of the committed-order listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow(pub order::Model);

impl fmt::Display for OrderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order ID: {}, User: {}, Product: {}, Quantity: {}",
            self.0.id, self.0.user_id, self.0.product_id, self.0.quantity
        )
    }
}

/// Lists committed orders in insertion order.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderRow>> {
    let orders = Order::find()
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;
    Ok(orders.into_iter().map(OrderRow).collect())
}
