pub mod manufacturer;
pub mod organization;
pub mod organization_member;
pub mod ship;
pub mod ship_component;

pub use manufacturer::ManufacturerRepository;
pub use organization::OrganizationRepository;
pub use organization_member::OrgMemberRepository;
pub use ship::ShipRepository;
pub use ship_component::ShipComponentRepository;
