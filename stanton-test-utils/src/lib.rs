pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{
        fixtures::factory,
        fixtures::mockito::{mock_discord_profile, mock_discord_token},
        test_setup_with_auth_tables, test_setup_with_tables, TestError, TestSetup,
    };
}
