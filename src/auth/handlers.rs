// HTTP handlers for authentication endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{Credentials, TokenResponse, UserResponse},
    service::AuthService,
};

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/",
    request_body = Credentials,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Missing or empty login or password", body = String, example = json!({"error": "login: login must not be empty"})),
        (status = 409, description = "Login already taken", body = String, example = json!({"error": "Login already exists"}))
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<UserResponse>, AuthError> {
    let Json(request) = payload?;
    request.validate()?;

    let user = service.register(&request.login, &request.password).await?;
    Ok(Json(user.into()))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/login/",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials accepted", body = TokenResponse),
        (status = 400, description = "Missing or empty login or password", body = String, example = json!({"error": "password: password must not be empty"})),
        (status = 401, description = "Invalid login or password", body = String, example = json!({"error": "Invalid login or password"}))
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(request) = payload?;
    request.validate()?;

    let token = service.login(&request.login, &request.password).await?;
    Ok(Json(TokenResponse::bearer(token)))
}

/// Get the user the bearer token was issued to
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = String, example = json!({"error": "Token has expired"}))
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me_handler(
    State(service): State<Arc<AuthService>>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let user = service.current_user(&user.login).await?;
    Ok(Json(user.into()))
}
