//! HTTP controllers.
//!
//! Controllers stay thin: extract, delegate to a service, map the result
//! into a response. Error mapping lives on the error enums' `IntoResponse`
//! implementations.

pub mod admin_database;
pub mod admin_users;
pub mod auth;
pub mod blog;
pub mod health;
pub mod items;
pub mod members;
