//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations,
//! organized by domain. Auth repositories operate on the auth database
//! connection; everything else operates on the app database. Catalog
//! repositories are generic over [`sea_orm::ConnectionTrait`] so the sync
//! services can run them inside per-item transactions.

pub mod auth;
pub mod catalog;
pub mod content;
pub mod fleet;
pub mod member;
pub mod squadron;
