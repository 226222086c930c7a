pub use crate::auth_user::Entity as AuthUser;
pub use crate::blog_post::Entity as BlogPost;
pub use crate::fleet_ship::Entity as FleetShip;
pub use crate::item::Entity as Item;
pub use crate::manufacturer::Entity as Manufacturer;
pub use crate::member::Entity as Member;
pub use crate::organization::Entity as Organization;
pub use crate::organization_member::Entity as OrganizationMember;
pub use crate::ship::Entity as Ship;
pub use crate::ship_component::Entity as ShipComponent;
pub use crate::squadron::Entity as Squadron;
pub use crate::squadron_member::Entity as SquadronMember;
