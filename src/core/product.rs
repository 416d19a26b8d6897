//! Product business logic - Handles adding, listing, and deleting products.
//!
//! Price and stock arrive as raw strings. Parsing failures are reported as
//! format errors before any range checks run, so `"abc"` and `"-1"` fail
//! differently.

use crate::{
    core::input::{parse_integer, parse_real, require_selection},
    entities::{Order, Product, order, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use std::fmt;
use tracing::{info, instrument};

/// One line of the product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// Product identity
    pub id: i64,
    /// Product name
    pub name: String,
    /// Unit price, unrounded
    pub price: f64,
    /// Units on hand
    pub stock: i64,
}

impl From<product::Model> for ProductRow {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            stock: model.stock,
        }
    }
}

impl fmt::Display for ProductRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - ${:.2} (Stock: {})",
            self.id, self.name, self.price, self.stock
        )
    }
}

/// Adds a product from raw form input.
///
/// # Errors
/// Returns an error if:
/// - The price is not a finite number or the stock is not an integer (format)
/// - The name is empty, or price/stock is negative (validation)
/// - The database insert fails
#[instrument(skip(db))]
pub async fn add_product(
    db: &DatabaseConnection,
    name: &str,
    price: &str,
    stock: &str,
) -> Result<product::Model> {
    let price = parse_real("Price", price)?;
    let stock = parse_integer("Stock", stock)?;

    let name = name.trim();
    if name.is_empty() || price < 0.0 || stock < 0 {
        return Err(Error::validation(
            "Name is required and price and stock cannot be negative",
        ));
    }

    let product = product::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        stock: Set(stock),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!(product_id = created.id, "Product added");
    Ok(created)
}

/// Deletes the selected product. A missing id is a no-op that affects zero rows.
///
/// # Errors
/// Returns an error if:
/// - No product is selected
/// - Orders still reference the product
/// - The database operation fails
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, selection: Option<i64>) -> Result<u64> {
    let product_id = require_selection("product", selection)?;

    let dependents = Order::find()
        .filter(order::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    if dependents > 0 {
        return Err(Error::InUse {
            entity: "Product",
            id: product_id,
            dependents,
        });
    }

    let result = Product::delete_by_id(product_id).exec(db).await?;
    info!(product_id, rows = result.rows_affected, "Product deleted");
    Ok(result.rows_affected)
}

/// Lists all products in insertion order.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<ProductRow>> {
    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    Ok(products.into_iter().map(ProductRow::from).collect())
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_product_validation() -> Result<()> {
        let db = setup_test_db().await?;

        for (name, price, stock) in [("Widget", "-1", "10"), ("Widget", "9.99", "-1"), ("", "1", "1")] {
            let result = add_product(&db, name, price, stock).await;
            assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));
        }

        assert!(list_products(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_product_format_errors() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_product(&db, "Widget", "abc", "10").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Format { field: "Price", .. }
        ));

        let result = add_product(&db, "Widget", "9.99", "ten").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Format { field: "Stock", .. }
        ));

        // Parsing runs before the empty-name check
        let result = add_product(&db, "", "abc", "10").await;
        assert!(matches!(result.unwrap_err(), Error::Format { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_product_round_trips_through_listing() -> Result<()> {
        let db = setup_test_db().await?;

        let created = add_product(&db, "Widget", "9.99", "10").await?;
        let products = list_products(&db).await?;

        assert_eq!(
            products,
            vec![ProductRow {
                id: created.id,
                name: "Widget".to_string(),
                price: 9.99,
                stock: 10,
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_product_display_rounds_but_storage_does_not() -> Result<()> {
        let db = setup_test_db().await?;

        let created = add_product(&db, "Bolt", "0.1234", "0").await?;
        let stored = get_product_by_id(&db, created.id).await?.unwrap();
        assert_eq!(stored.price, 0.1234);

        let row = ProductRow::from(stored);
        assert_eq!(row.to_string(), format!("{}: Bolt - $0.12 (Stock: 0)", created.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Widget").await?;

        let result = delete_product(&db, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Selection { entity: "product" }
        ));
        assert_eq!(list_products(&db).await?.len(), 1);

        assert_eq!(delete_product(&db, Some(product.id)).await?, 1);
        assert!(list_products(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_with_orders_is_refused() -> Result<()> {
        let (db, user, product) = setup_with_user_and_product().await?;
        place_test_order(&db, user.id, product.id, 2).await?;

        let result = delete_product(&db, Some(product.id)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InUse { entity: "Product", .. }
        ));
        assert!(get_product_by_id(&db, product.id).await?.is_some());
        Ok(())
    }
}
