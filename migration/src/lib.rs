pub use sea_orm_migration::prelude::*;

mod m20250612_000001_manufacturer;
mod m20250612_000002_ship;
mod m20250612_000003_ship_component;
mod m20250612_000004_organization;
mod m20250612_000005_organization_member;
mod m20250612_000006_member;
mod m20250612_000007_fleet_ship;
mod m20250612_000008_squadron;
mod m20250612_000009_squadron_member;
mod m20250612_000010_blog_post;
mod m20250612_000011_item;
mod m20250612_000012_auth_user;

/// Migrator for the app database (catalog, members, fleet, squadrons,
/// content).
pub struct AppMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AppMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250612_000001_manufacturer::Migration),
            Box::new(m20250612_000002_ship::Migration),
            Box::new(m20250612_000003_ship_component::Migration),
            Box::new(m20250612_000004_organization::Migration),
            Box::new(m20250612_000005_organization_member::Migration),
            Box::new(m20250612_000006_member::Migration),
            Box::new(m20250612_000007_fleet_ship::Migration),
            Box::new(m20250612_000008_squadron::Migration),
            Box::new(m20250612_000009_squadron_member::Migration),
            Box::new(m20250612_000010_blog_post::Migration),
            Box::new(m20250612_000011_item::Migration),
        ]
    }
}

/// Migrator for the auth database. Kept separate because login accounts live
/// in their own storage scope with no foreign keys into the app database.
pub struct AuthMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AuthMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250612_000012_auth_user::Migration)]
    }
}
