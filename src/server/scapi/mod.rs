//! Star Citizen API client.
//!
//! Thin read-only client for the community Star Citizen API. The API key is
//! embedded in the URL path (`{base}/{key}/{endpoint}`); responses arrive in
//! a `{success, message, data}` envelope. All transport, status and decode
//! failures are normalized into [`ScApiError`] with a readable message.
//!
//! Responses are cached in a process-wide TTL cache: ship specs barely change
//! and are kept for 24 hours, organization rosters for 1 hour. A client built
//! without an API key is disabled rather than a startup failure; every call
//! on it returns [`ScApiError::MissingApiKey`].

pub mod cache;

use std::{sync::Arc, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::server::scapi::cache::ResponseCache;

static REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ship specs are near-static upstream.
pub static SHIP_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Organization data and rosters change more often.
pub static ROSTER_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

pub static CACHE_PREFIX_SHIPS: &str = "sc_api:ships";
pub static CACHE_PREFIX_ORG: &str = "sc_api:org";

#[derive(Error, Debug)]
pub enum ScApiError {
    #[error("Star Citizen API key is not configured")]
    MissingApiKey,
    #[error("API error: {0}")]
    Api(String),
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Response envelope used by every Star Citizen API endpoint.
#[derive(Deserialize)]
struct Envelope {
    success: Option<serde_json::Value>,
    message: Option<String>,
    data: Option<serde_json::Value>,
}

impl Envelope {
    // The field is `1`/`0` on most endpoints but a boolean on a few.
    fn is_success(&self) -> bool {
        match &self.success {
            None => true,
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::Number(n)) => n.as_i64() != Some(0),
            Some(_) => true,
        }
    }
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    cache: Arc<ResponseCache>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Whether the client holds an API key. A disabled client fails every
    /// request with [`ScApiError::MissingApiKey`] instead of the process
    /// refusing to start.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches all ships. Cached for [`SHIP_CACHE_TTL`].
    pub async fn get_ships(&self) -> Result<Vec<serde_json::Value>, ScApiError> {
        let data = self
            .cached(CACHE_PREFIX_SHIPS, SHIP_CACHE_TTL, "v1/cache/ships")
            .await?;

        Ok(data.as_array().cloned().unwrap_or_default())
    }

    /// Fetches a single ship by its upstream id. Cached for
    /// [`SHIP_CACHE_TTL`].
    pub async fn get_ship(&self, ship_id: i64) -> Result<Option<serde_json::Value>, ScApiError> {
        let data = self
            .cached(
                &format!("{CACHE_PREFIX_SHIPS}:{ship_id}"),
                SHIP_CACHE_TTL,
                &format!("v1/cache/ships/{ship_id}"),
            )
            .await?;

        Ok(not_null(data))
    }

    /// Fetches organization details by SID. Cached for [`ROSTER_CACHE_TTL`].
    pub async fn get_organization(
        &self,
        sid: &str,
    ) -> Result<Option<serde_json::Value>, ScApiError> {
        let data = self
            .cached(
                &format!("{CACHE_PREFIX_ORG}:{sid}"),
                ROSTER_CACHE_TTL,
                &format!("v1/live/organization/{sid}"),
            )
            .await?;

        Ok(not_null(data))
    }

    /// Fetches the organization member roster. Only available in live mode
    /// upstream. Cached for [`ROSTER_CACHE_TTL`].
    pub async fn get_organization_members(
        &self,
        sid: &str,
    ) -> Result<Vec<serde_json::Value>, ScApiError> {
        let data = self
            .cached(
                &format!("{CACHE_PREFIX_ORG}_members:{sid}"),
                ROSTER_CACHE_TTL,
                &format!("v1/live/organization_members/{sid}"),
            )
            .await?;

        Ok(data.as_array().cloned().unwrap_or_default())
    }

    /// Drops cached responses. With a prefix only matching keys are cleared,
    /// without one the whole cache is.
    pub fn clear_cache(&self, prefix: Option<&str>) {
        match prefix {
            Some(prefix) => {
                let cleared = self.cache.clear_prefix(prefix);
                tracing::debug!(prefix, cleared, "cleared cached API responses");
            }
            None => self.cache.clear(),
        }
    }

    async fn cached(
        &self,
        cache_key: &str,
        ttl: Duration,
        endpoint: &str,
    ) -> Result<serde_json::Value, ScApiError> {
        if let Some(hit) = self.cache.get(cache_key) {
            tracing::debug!(cache_key, "serving cached API response");
            return Ok(hit);
        }

        let data = self.request(endpoint).await?;
        self.cache.insert(cache_key, data.clone(), ttl);

        Ok(data)
    }

    async fn request(&self, endpoint: &str) -> Result<serde_json::Value, ScApiError> {
        let api_key = self.api_key.as_ref().ok_or(ScApiError::MissingApiKey)?;
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            api_key,
            endpoint
        );

        tracing::debug!(endpoint, "fetching from Star Citizen API");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let envelope: Envelope = response.json().await?;

        if !envelope.is_success() {
            let message = envelope
                .message
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(ScApiError::Api(message));
        }

        Ok(envelope.data.unwrap_or(serde_json::Value::Null))
    }
}

fn not_null(data: serde_json::Value) -> Option<serde_json::Value> {
    match data {
        serde_json::Value::Null => None,
        data => Some(data),
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn maybe_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn build(self) -> Result<Client, ScApiError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("Stanton/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Client {
            http,
            base_url: self
                .base_url
                .unwrap_or_else(|| "https://api.starcitizen-api.com".to_string()),
            api_key: self.api_key,
            cache: Arc::new(ResponseCache::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> Client {
        Client::builder()
            .base_url(&server.url())
            .api_key("test_key")
            .build()
            .unwrap()
    }

    /// Expect the ships list to come back unwrapped from the envelope
    #[tokio::test]
    async fn fetches_ships_from_envelope() {
        let mut server = mockito::Server::new_async().await;
        let endpoint = server
            .mock("GET", "/test_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": 1, "data": [{"name": "Sabre"}]}"#)
            .create();

        let client = client_for(&server);
        let ships = client.get_ships().await.unwrap();

        assert_eq!(ships.len(), 1);
        assert_eq!(ships[0]["name"], "Sabre");
        endpoint.assert();
    }

    /// Expect a second fetch to be served from cache without a network call
    #[tokio::test]
    async fn second_fetch_hits_cache() {
        let mut server = mockito::Server::new_async().await;
        let endpoint = server
            .mock("GET", "/test_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": 1, "data": []}"#)
            .expect(1)
            .create();

        let client = client_for(&server);
        client.get_ships().await.unwrap();
        client.get_ships().await.unwrap();

        endpoint.assert();
    }

    /// Expect clearing the cache to force a refetch
    #[tokio::test]
    async fn clear_cache_forces_refetch() {
        let mut server = mockito::Server::new_async().await;
        let endpoint = server
            .mock("GET", "/test_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": 1, "data": []}"#)
            .expect(2)
            .create();

        let client = client_for(&server);
        client.get_ships().await.unwrap();
        client.clear_cache(Some(CACHE_PREFIX_SHIPS));
        client.get_ships().await.unwrap();

        endpoint.assert();
    }

    /// Expect an envelope with success=0 to surface as an API error
    #[tokio::test]
    async fn envelope_failure_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/test_key/v1/live/organization/FAROUT")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": 0, "message": "Organisation not found"}"#)
            .create();

        let client = client_for(&server);
        let result = client.get_organization("FAROUT").await;

        assert!(matches!(result, Err(ScApiError::Api(_))));
    }

    /// Expect a non-2xx status to surface as a transport error
    #[tokio::test]
    async fn http_failure_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/test_key/v1/cache/ships")
            .with_status(500)
            .create();

        let client = client_for(&server);
        let result = client.get_ships().await;

        assert!(matches!(result, Err(ScApiError::Http(_))));
    }

    /// Expect a client without an API key to be disabled
    #[tokio::test]
    async fn missing_api_key_disables_client() {
        let client = Client::builder().build().unwrap();

        assert!(!client.is_enabled());

        let result = client.get_ships().await;
        assert!(matches!(result, Err(ScApiError::MissingApiKey)));
    }
}
