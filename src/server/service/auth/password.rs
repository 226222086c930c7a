//! Password hashing and local (non-OAuth) login.
//!
//! Hashes use argon2 with a random salt; verification is the crate's
//! constant-time comparison. Local login collapses unknown username, wrong
//! password and deactivated account into one generic failure so the API
//! cannot be used to enumerate accounts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::auth::AuthUserRepository,
    error::{auth::AuthError, Error},
};

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| Error::InternalError(format!("password hashing failed: {err}")))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub struct LocalLoginService<'a> {
    auth_db: &'a DatabaseConnection,
}

impl<'a> LocalLoginService<'a> {
    /// Creates a new instance of [`LocalLoginService`]
    pub fn new(auth_db: &'a DatabaseConnection) -> Self {
        Self { auth_db }
    }

    /// Validates a username/password pair and refreshes the last-login
    /// timestamp on success.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<entity::auth_user::Model, Error> {
        let user_repo = AuthUserRepository::new(self.auth_db);

        let Some(user) = user_repo.get_by_username(username).await? else {
            // Burn comparable time for unknown usernames so the response
            // timing matches the wrong-password path.
            let _ = hash_password(password);
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(stored_hash) = &user.password_hash else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, stored_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = user_repo.touch_last_login(user).await?;

        Ok(user)
    }

    /// Changes a local account's password after verifying the old one.
    /// Discord-only accounts carry no password credential and are rejected.
    pub async fn change_password(
        &self,
        user: entity::auth_user::Model,
        old_password: &str,
        new_password: &str,
    ) -> Result<entity::auth_user::Model, Error> {
        let Some(stored_hash) = &user.password_hash else {
            return Err(AuthError::NoLocalPassword.into());
        };

        if !verify_password(old_password, stored_hash) {
            return Err(AuthError::WrongOldPassword.into());
        }

        let new_hash = hash_password(new_password)?;
        let user = AuthUserRepository::new(self.auth_db)
            .set_password(user, &new_hash)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use entity::auth_user::UserRole;
    use stanton_test_utils::prelude::*;

    use super::*;

    async fn seed_user(
        test: &TestSetup,
        username: &str,
        password: &str,
    ) -> Result<entity::auth_user::Model, TestError> {
        let hash = hash_password(password).unwrap();
        let user = AuthUserRepository::new(&test.auth_db)
            .create_local(username, "admin@example.com", &hash, UserRole::Admin, true)
            .await?;

        Ok(user)
    }

    /// Expect hashing to be salted: same password, different hashes, both
    /// verifiable
    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first));
        assert!(verify_password("hunter2", &second));
        assert!(!verify_password("hunter3", &first));
    }

    /// Expect a valid login to succeed and touch last_login
    #[tokio::test]
    async fn valid_login_succeeds() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!()?;
        seed_user(&test, "admin", "hunter2").await?;

        let service = LocalLoginService::new(&test.auth_db);
        let user = service.authenticate("admin", "hunter2").await.unwrap();

        assert_eq!(user.username, "admin");
        assert!(user.last_login.is_some());

        Ok(())
    }

    /// Expect unknown username and wrong password to be indistinguishable
    #[tokio::test]
    async fn failures_are_generic() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!()?;
        seed_user(&test, "admin", "hunter2").await?;

        let service = LocalLoginService::new(&test.auth_db);

        let unknown_user = service.authenticate("nobody", "hunter2").await;
        let wrong_password = service.authenticate("admin", "wrong").await;

        let unknown_message = unknown_user.unwrap_err().to_string();
        let wrong_message = wrong_password.unwrap_err().to_string();
        assert_eq!(unknown_message, wrong_message);

        Ok(())
    }

    /// Expect a deactivated account to fail with the same generic error
    #[tokio::test]
    async fn inactive_account_fails_generically() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!()?;
        let user = seed_user(&test, "admin", "hunter2").await?;
        AuthUserRepository::new(&test.auth_db).deactivate(user).await?;

        let service = LocalLoginService::new(&test.auth_db);
        let result = service.authenticate("admin", "hunter2").await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Expect password change to verify the old password and clear the
    /// must-change flag
    #[tokio::test]
    async fn change_password_flow() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!()?;
        let user = seed_user(&test, "admin", "hunter2").await?;
        assert!(user.must_change_password);

        let service = LocalLoginService::new(&test.auth_db);

        let rejected = service
            .change_password(user.clone(), "wrong", "new-password")
            .await;
        assert!(matches!(
            rejected,
            Err(Error::AuthError(AuthError::WrongOldPassword))
        ));

        let updated = service
            .change_password(user, "hunter2", "new-password")
            .await
            .unwrap();
        assert!(!updated.must_change_password);

        let relogin = service.authenticate("admin", "new-password").await;
        assert!(relogin.is_ok());

        Ok(())
    }
}
