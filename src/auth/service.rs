// Authentication service - business logic layer

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info};

use crate::auth::{
    error::AuthError,
    models::User,
    password::PasswordService,
    repository::CredentialStore,
    token::{Claims, TokenService},
};

/// Lifetime of tokens issued by `login`
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Authentication service coordinating all auth operations
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    password_service: PasswordService,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        store: Arc<dyn CredentialStore>,
        password_service: PasswordService,
        token_service: TokenService,
    ) -> Self {
        Self {
            store,
            password_service,
            token_service,
        }
    }

    /// Register a new user
    pub async fn register(&self, login: &str, password: &str) -> Result<User, AuthError> {
        debug!("Registering user: {}", login);

        let password_hash = self.hash_password(password).await?;
        let user = self.store.create(login, &password_hash).await?;

        info!("Registered user with id: {}", user.id);
        Ok(user)
    }

    /// Login a user, returning a signed access token
    ///
    /// An unknown login and a wrong password both produce `InvalidCredentials`,
    /// and both run a full Argon2 verification so they take the same time.
    pub async fn login(&self, login: &str, password: &str) -> Result<String, AuthError> {
        let user = self.store.find_by_login(login).await?;

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.password_service.dummy_hash().to_string(),
        };
        let verified = self.verify_password(password, &stored_hash).await?;

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = self
            .token_service
            .issue(&user.login, Duration::minutes(ACCESS_TOKEN_TTL_MINUTES))?;

        debug!("Issued access token for user id: {}", user.id);
        Ok(token)
    }

    /// Validate a bearer token
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.token_service.validate(token)?)
    }

    /// Load the user named by a validated token subject
    ///
    /// A subject with no matching user is treated as an invalid token.
    pub async fn current_user(&self, login: &str) -> Result<User, AuthError> {
        self.store
            .find_by_login(login)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let passwords = self.password_service.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                AuthError::PasswordHashError
            })?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let passwords = self.password_service.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || passwords.verify_password(&password, &hash))
            .await
            .map_err(|e| {
                error!("Password verification task failed: {}", e);
                AuthError::PasswordHashError
            })
    }
}
