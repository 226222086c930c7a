pub mod user;

pub use user::AuthUserRepository;
