//! Discord OAuth client.
//!
//! Wraps the `oauth2` crate for the authorization-code exchange and reqwest
//! for the profile fetch. Endpoint URLs are overridable so tests can point
//! the client at a mock server.

use std::time::Duration;

use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::server::error::{auth::AuthError, config::ConfigError, Error};

static DISCORD_API_BASE: &str = "https://discord.com/api/v10";
static DISCORD_AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";
static DISCORD_TOKEN_URL: &str = "https://discord.com/api/v10/oauth2/token";
static REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type ConfiguredOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// External identity profile returned by Discord's `/users/@me`.
#[derive(Clone, Debug, Deserialize)]
pub struct DiscordProfile {
    pub id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
}

impl DiscordProfile {
    /// CDN URL for the avatar hash, when one is set.
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("https://cdn.discordapp.com/avatars/{}/{}.png", self.id, hash))
    }
}

/// Login URL plus the state token that must round-trip the callback.
pub struct AuthorizeRequest {
    pub url: String,
    pub state: String,
}

#[derive(Clone)]
pub struct DiscordClient {
    oauth: ConfiguredOAuthClient,
    http: reqwest::Client,
    api_base: String,
}

impl DiscordClient {
    pub fn builder() -> DiscordClientBuilder {
        DiscordClientBuilder::default()
    }

    /// Builds the authorization URL with a freshly minted random state.
    pub fn authorize_request(&self) -> AuthorizeRequest {
        let (url, state) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url();

        AuthorizeRequest {
            url: url.to_string(),
            state: state.secret().to_string(),
        }
    }

    /// Exchanges the callback authorization code for an access token.
    /// Server-to-server; any non-success response is fatal to the login.
    pub async fn exchange_code(&self, code: &str) -> Result<String, Error> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|err| AuthError::TokenExchangeFailed(err.to_string()))?;

        Ok(token.access_token().secret().to_string())
    }

    /// Fetches the external identity's profile with the access token.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<DiscordProfile, Error> {
        let response = self
            .http
            .get(format!("{}/users/@me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| AuthError::ProfileFetchFailed(err.to_string()))?;

        if !response.status().is_success() {
            return Err(
                AuthError::ProfileFetchFailed(format!("status {}", response.status())).into(),
            );
        }

        let profile = response
            .json()
            .await
            .map_err(|err| AuthError::ProfileFetchFailed(err.to_string()))?;

        Ok(profile)
    }
}

#[derive(Default)]
pub struct DiscordClientBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    api_base: Option<String>,
    authorize_url: Option<String>,
    token_url: Option<String>,
}

impl DiscordClientBuilder {
    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = Some(client_id.to_string());
        self
    }

    pub fn client_secret(mut self, client_secret: &str) -> Self {
        self.client_secret = Some(client_secret.to_string());
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: &str) -> Self {
        self.redirect_uri = Some(redirect_uri.to_string());
        self
    }

    /// Overrides the Discord API base URL; used by tests.
    pub fn api_base(mut self, api_base: &str) -> Self {
        self.api_base = Some(api_base.to_string());
        self
    }

    /// Overrides the authorize endpoint; used by tests.
    pub fn authorize_url(mut self, authorize_url: &str) -> Self {
        self.authorize_url = Some(authorize_url.to_string());
        self
    }

    /// Overrides the token endpoint; used by tests.
    pub fn token_url(mut self, token_url: &str) -> Self {
        self.token_url = Some(token_url.to_string());
        self
    }

    pub fn build(self) -> Result<DiscordClient, Error> {
        let client_id = self
            .client_id
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_CLIENT_ID".to_string()))?;
        let client_secret = self
            .client_secret
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_CLIENT_SECRET".to_string()))?;
        let redirect_uri = self
            .redirect_uri
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_REDIRECT_URI".to_string()))?;

        let authorize_url = self
            .authorize_url
            .unwrap_or_else(|| DISCORD_AUTHORIZE_URL.to_string());
        let token_url = self.token_url.unwrap_or_else(|| DISCORD_TOKEN_URL.to_string());

        let oauth = BasicClient::new(ClientId::new(client_id))
            .set_client_secret(ClientSecret::new(client_secret))
            .set_auth_uri(AuthUrl::new(authorize_url).map_err(invalid_url)?)
            .set_token_uri(TokenUrl::new(token_url).map_err(invalid_url)?)
            .set_redirect_uri(RedirectUrl::new(redirect_uri).map_err(invalid_url)?);

        let http = reqwest::Client::builder()
            .user_agent(format!("Stanton/{}", env!("CARGO_PKG_VERSION")))
            // Discord's OAuth endpoints must never be followed blindly.
            .redirect(reqwest::redirect::Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::InternalError(err.to_string()))?;

        Ok(DiscordClient {
            oauth,
            http,
            api_base: self.api_base.unwrap_or_else(|| DISCORD_API_BASE.to_string()),
        })
    }
}

fn invalid_url(err: oauth2::url::ParseError) -> Error {
    ConfigError::InvalidEnvValue {
        var: "discord oauth url".to_string(),
        reason: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> DiscordClient {
        DiscordClient::builder()
            .client_id("client_id")
            .client_secret("client_secret")
            .redirect_uri("http://localhost:8000/auth/discord/callback")
            .build()
            .unwrap()
    }

    /// Expect the authorize URL to carry the minted state and both scopes
    #[test]
    fn authorize_request_carries_state_and_scopes() {
        let client = test_client();

        let request = client.authorize_request();

        assert!(request.url.contains(&format!("state={}", request.state)));
        assert!(request.url.contains("identify"));
        assert!(request.url.contains("email"));
        assert!(request.url.contains("client_id=client_id"));
    }

    /// Expect consecutive requests to mint distinct states
    #[test]
    fn states_are_random_per_request() {
        let client = test_client();

        let first = client.authorize_request();
        let second = client.authorize_request();

        assert_ne!(first.state, second.state);
    }

    /// Expect a missing client id to fail the build with a config error
    #[test]
    fn build_requires_credentials() {
        let result = DiscordClient::builder()
            .client_secret("secret")
            .redirect_uri("http://localhost:8000/cb")
            .build();

        assert!(result.is_err());
    }

    /// Expect the avatar URL to follow the CDN scheme
    #[test]
    fn avatar_url_uses_the_cdn() {
        let profile = DiscordProfile {
            id: "42".to_string(),
            username: "kirk".to_string(),
            discriminator: None,
            avatar: Some("abc123".to_string()),
            email: None,
        };

        assert_eq!(
            profile.avatar_url(),
            Some("https://cdn.discordapp.com/avatars/42/abc123.png".to_string())
        );

        let bald = DiscordProfile {
            avatar: None,
            ..profile
        };
        assert_eq!(bald.avatar_url(), None);
    }
}
