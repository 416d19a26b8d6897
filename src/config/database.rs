//! Database configuration module for the point-of-sale manager.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the foreign keys declared by the
//! `belongs_to` relations (orders → users/products, payments → orders) are part
//! of the generated DDL. Creation is idempotent so an existing database file is
//! reused across runs.

use crate::config::DatabaseSettings;
use crate::entities::{Order, Payment, Product, User};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Establishes a connection to the database described by `settings`.
///
/// `SQLx` enables `PRAGMA foreign_keys` on every `SQLite` connection it opens,
/// so the declared foreign keys are enforced by the storage engine.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_connection(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options.sqlx_logging(settings.sqlx_logging);

    let db = Database::connect(options).await?;
    info!("Database connection opened.");
    Ok(db)
}

/// Creates all four tables if they do not exist yet.
///
/// Order matters: referenced tables are created before the tables that point
/// at them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut order_table = schema.create_table_from_entity(Order);
    let mut payment_table = schema.create_table_from_entity(Payment);

    for table in [
        user_table.if_not_exists(),
        product_table.if_not_exists(),
        order_table.if_not_exists(),
        payment_table.if_not_exists(),
    ] {
        db.execute(builder.build(&*table)).await?;
    }

    debug!("Tables ensured: users, products, orders, payments");
    Ok(())
}

/// Connects and ensures the schema in one step, as done at startup.
pub async fn init_database(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let db = create_connection(settings).await?;
    create_tables(&db).await?;
    Ok(db)
}
