use crate::server::service::auth::discord::{AuthorizeRequest, DiscordClient};

/// Builds the Discord login URL and the state token to stash in the
/// session before redirecting the user out.
pub fn login_service(discord: &DiscordClient) -> AuthorizeRequest {
    discord.authorize_request()
}
