//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the four tables and their foreign-key relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;
pub mod payment;
pub mod product;
pub mod user;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
