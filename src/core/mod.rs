//! Core business logic - framework-agnostic user, product, order, and payment operations.
//!
//! Every operation takes an explicit database handle. Raw form values are
//! parsed here, so any front end can pass its field contents straight through.

/// Raw field parsing shared by the managers
pub mod input;
/// Order staging and batch placement
pub mod order;
/// Payment recording and listing
pub mod payment;
/// Product management
pub mod product;
/// User management and credentials
pub mod user;
