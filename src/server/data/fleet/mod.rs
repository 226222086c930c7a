pub mod fleet_ship;

pub use fleet_ship::FleetShipRepository;
