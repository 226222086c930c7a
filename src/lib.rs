//! Stanton, the membership portal backend for a Star Citizen organization.
//!
//! The crate is split into [`model`] (shared request/response DTOs) and
//! [`server`] (configuration, HTTP controllers, data access, catalog
//! synchronization, and the identity reconciliation flow).

pub mod model;
pub mod server;
