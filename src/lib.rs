pub mod auth;
pub mod config;
pub mod db;
pub mod tracks;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, Credentials, TokenResponse, UserResponse};
use tracks::{MessageResponse, Track, TrackStore};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::me_handler,
        tracks::handlers::list_tracks,
        tracks::handlers::get_track,
        tracks::handlers::add_track,
        tracks::handlers::update_track,
        tracks::handlers::delete_track,
    ),
    components(
        schemas(Credentials, TokenResponse, UserResponse, Track, MessageResponse)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and bearer token login"),
        (name = "tracks", description = "Track collection endpoints")
    ),
    info(
        title = "Track API",
        version = "0.1.0",
        description = "User registration, JWT login and a music track collection"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tracks: Arc<TrackStore>,
}

impl AppState {
    pub fn new(auth: AuthService, tracks: TrackStore) -> Self {
        Self {
            auth: Arc::new(auth),
            tracks: Arc::new(tracks),
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<TrackStore> {
    fn from_ref(state: &AppState) -> Self {
        state.tracks.clone()
    }
}

/// Creates and configures the application router
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth routes
        .route("/users/", post(auth::register_handler))
        .route("/users/me", get(auth::me_handler))
        .route("/login/", post(auth::login_handler))
        // Track routes
        .route("/tracks", get(tracks::list_tracks).post(tracks::add_track))
        .route(
            "/track/:id",
            get(tracks::get_track)
                .put(tracks::update_track)
                .delete(tracks::delete_track),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
