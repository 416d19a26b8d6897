//! User business logic - Handles adding, listing, and deleting operators.
//!
//! Passwords are hashed with Argon2 before they reach storage and are never
//! returned by the listing functions.

use crate::{
    core::input::{require_selection, require_text},
    entities::{Order, User, order, user},
    errors::{Error, Result},
};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::{SaltString, rand_core::OsRng};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use std::{fmt, str::FromStr};
use tracing::{info, instrument};

/// Permission level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full access
    Admin,
    /// Till operator
    Staff,
}

impl Role {
    /// Canonical storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            other => Err(Error::validation(format!(
                "Role must be Admin or Staff (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the user listing. Carries no credential data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    /// User identity
    pub id: i64,
    /// Display name
    pub name: String,
    /// Stored role name
    pub role: String,
}

impl From<user::Model> for UserRow {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
        }
    }
}

impl fmt::Display for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.id, self.name, self.role)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Credential {
            message: e.to_string(),
        })
}

/// Adds a user after checking that name, role, and password are all present.
///
/// # Errors
/// Returns an error if:
/// - Any field is empty or whitespace-only
/// - The role is not `Admin` or `Staff`
/// - Hashing or the database insert fails
#[instrument(skip(db, password))]
pub async fn add_user(
    db: &DatabaseConnection,
    name: &str,
    role: &str,
    password: &str,
) -> Result<user::Model> {
    let name = require_text("Name", name)?;
    let role = require_text("Role", role)?;
    require_text("Password", password)?;
    let role: Role = role.parse()?;

    let user = user::ActiveModel {
        name: Set(name.to_string()),
        role: Set(role.as_str().to_string()),
        password: Set(hash_password(password)?),
        ..Default::default()
    };
    let created = user.insert(db).await?;
    info!(user_id = created.id, "User added");
    Ok(created)
}

/// Deletes the selected user. A missing id is a no-op that affects zero rows.
///
/// # Errors
/// Returns an error if:
/// - No user is selected
/// - Orders still reference the user
/// - The database operation fails
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, selection: Option<i64>) -> Result<u64> {
    let user_id = require_selection("user", selection)?;

    let dependents = Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    if dependents > 0 {
        return Err(Error::InUse {
            entity: "User",
            id: user_id,
            dependents,
        });
    }

    let result = User::delete_by_id(user_id).exec(db).await?;
    info!(user_id, rows = result.rows_affected, "User deleted");
    Ok(result.rows_affected)
}

/// Lists all users in insertion order.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserRow>> {
    let users = User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(users.into_iter().map(UserRow::from).collect())
}

/// Retrieves a specific user by ID.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Checks a candidate password against the stored hash.
///
/// # Errors
/// Returns an error if the user does not exist or the stored hash is malformed.
#[instrument(skip(db, candidate))]
pub async fn verify_password(db: &DatabaseConnection, user_id: i64, candidate: &str) -> Result<bool> {
    let user = get_user_by_id(db, user_id)
        .await?
        .ok_or(Error::Reference {
            entity: "User",
            id: user_id,
        })?;

    let parsed = PasswordHash::new(&user.password).map_err(|e| Error::Credential {
        message: e.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}
