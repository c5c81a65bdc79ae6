// Bearer token extraction for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::{error::AuthError, service::AuthService};

/// Authenticated user extractor for protected routes
///
/// Rejects with 401 when the `Authorization` header is missing, is not a
/// bearer token, or carries a token that fails validation.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub login: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = bearer_token(auth_header).ok_or(AuthError::InvalidToken)?;

        let service = Arc::<AuthService>::from_ref(state);
        let claims = service.authenticate(token)?;

        debug!("Authenticated request for {}", claims.sub);
        Ok(AuthenticatedUser { login: claims.sub })
    }
}

/// Strip the `Bearer` scheme (case-insensitive) from a header value
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
