/// API key baked into mock Star Citizen API paths.
pub static TEST_SC_API_KEY: &str = "test_sc_key";

pub static TEST_DISCORD_CLIENT_ID: &str = "client_id";
pub static TEST_DISCORD_CLIENT_SECRET: &str = "client_secret";
pub static TEST_DISCORD_REDIRECT_URI: &str = "http://localhost:8000/auth/discord/callback";
