//! Shared test utilities for the point-of-sale manager.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        order::{OrderDraft, place_order},
        product, user,
    },
    entities,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * `role`: "Staff"
/// * `password`: "password"
pub async fn create_test_user(db: &DatabaseConnection, name: &str) -> Result<entities::user::Model> {
    user::add_user(db, name, "Staff", "password").await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * price: 10.0
/// * stock: 100
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::add_product(db, name, "10.0", "100").await
}

/// Stages a single line and places it, returning the committed order row.
pub async fn place_test_order(
    db: &DatabaseConnection,
    user_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<entities::order::Model> {
    let mut draft = OrderDraft::new();
    draft.stage_line(Some(user_id), Some(product_id), &quantity.to_string())?;
    place_order(db, &mut draft)
        .await?
        .pop()
        .ok_or_else(|| Error::validation("Order placement returned no rows"))
}

/// Sets up a complete test environment with one user and one product.
/// Returns (db, user, product) for order and payment tests.
pub async fn setup_with_user_and_product() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "Test User").await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, user, product))
}
