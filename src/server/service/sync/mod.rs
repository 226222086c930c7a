//! Catalog synchronization services.
//!
//! Each service pulls one entity family from the Star Citizen API and
//! reconciles it into local storage. Every item runs inside its own
//! transaction so one malformed record never rolls back its neighbours, and
//! re-running a sync is always safe because matching is done on natural
//! keys.

pub mod organization;
pub mod reconcile;
pub mod report;
pub mod ship;

pub use organization::OrgSyncService;
pub use report::SyncReport;
pub use ship::ShipSyncService;
