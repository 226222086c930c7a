//! Business logic services.
//!
//! Services orchestrate repositories and outbound clients. Controllers stay
//! thin and call into this layer; the sync CLI drives the sync services
//! directly.

pub mod auth;
pub mod content;
pub mod squadron;
pub mod sync;
pub mod user;
