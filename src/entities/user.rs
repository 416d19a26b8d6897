//! User entity - Represents an operator of the point-of-sale terminal.
//!
//! Users carry a role (`"Admin"` or `"Staff"`) and an Argon2-hashed password.
//! Users are created and deleted but never updated in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the user
    pub name: String,
    /// Canonical role name, see `core::user::Role`
    pub role: String,
    /// Argon2 PHC string, never the plain-text password
    #[serde(skip_serializing)]
    pub password: String,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
