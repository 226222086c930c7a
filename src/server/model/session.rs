//! Session wrapper for the OAuth login state token.
//!
//! The state token is minted at login initiation, stored in the session
//! (an http-only cookie backed by the session store), and must match the
//! `state` parameter echoed by Discord's callback byte for byte. The
//! callback takes it out of the session so it can only be used once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::{auth::AuthError, Error};

pub const SESSION_OAUTH_STATE_KEY: &str = "stanton:auth:oauth_state";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct OAuthLoginState(pub String);

impl OAuthLoginState {
    /// Stores the state token minted at login initiation.
    pub async fn insert(session: &Session, state: &str) -> Result<(), Error> {
        session
            .insert(SESSION_OAUTH_STATE_KEY, OAuthLoginState(state.to_string()))
            .await?;

        Ok(())
    }

    /// Retrieves the state token without consuming it.
    pub async fn get(session: &Session) -> Result<String, Error> {
        match session.get(SESSION_OAUTH_STATE_KEY).await? {
            Some(OAuthLoginState(state)) => Ok(state),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }

    /// Removes and returns the state token, making it single-use. Absence is
    /// an error: a callback without a prior login initiation is rejected.
    pub async fn take(session: &Session) -> Result<String, Error> {
        match session.remove(SESSION_OAUTH_STATE_KEY).await? {
            Some(OAuthLoginState(state)) => Ok(state),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use stanton_test_utils::prelude::*;

    use crate::server::{
        error::{auth::AuthError, Error},
        model::session::OAuthLoginState,
    };

    /// Expect an inserted state to be retrievable with the same value
    #[tokio::test]
    async fn inserted_state_is_retrievable() -> Result<(), TestError> {
        let test = TestSetup::new().await?;
        let state = "random_state_token";

        OAuthLoginState::insert(&test.session, state).await.unwrap();

        let stored = OAuthLoginState::get(&test.session).await.unwrap();
        assert_eq!(stored, state);

        Ok(())
    }

    /// Expect take to consume the state so a second take fails
    #[tokio::test]
    async fn take_is_single_use() -> Result<(), TestError> {
        let test = TestSetup::new().await?;
        OAuthLoginState::insert(&test.session, "state").await.unwrap();

        let first = OAuthLoginState::take(&test.session).await;
        assert!(first.is_ok());

        let second = OAuthLoginState::take(&test.session).await;
        assert!(matches!(
            second,
            Err(Error::AuthError(AuthError::CsrfMissingValue))
        ));

        Ok(())
    }

    /// Expect an error when no state was ever stored
    #[tokio::test]
    async fn fails_when_state_missing() -> Result<(), TestError> {
        let test = TestSetup::new().await?;

        let result = OAuthLoginState::take(&test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::CsrfMissingValue))
        ));

        Ok(())
    }
}
