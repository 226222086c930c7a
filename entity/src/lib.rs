pub mod prelude;

pub mod auth_user;
pub mod blog_post;
pub mod fleet_ship;
pub mod item;
pub mod manufacturer;
pub mod member;
pub mod organization;
pub mod organization_member;
pub mod ship;
pub mod ship_component;
pub mod squadron;
pub mod squadron_member;
