use std::sync::Arc;

use track_api::{
    auth::{AuthService, PasswordService, SqliteCredentialStore, TokenService},
    config::Config,
    create_router, db,
    tracks::TrackStore,
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Track API - Starting...");

    let config = Config::from_env().expect("Invalid configuration");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let password_service =
        PasswordService::new(config.hash_cost).expect("Failed to initialise password hashing");
    tracing::info!("Password hashing cost: {:?}", password_service.cost());

    let auth_service = AuthService::new(
        Arc::new(SqliteCredentialStore::new(db_pool)),
        password_service,
        TokenService::new(&config.jwt_secret),
    );
    let app = create_router(AppState::new(auth_service, TrackStore::new()));

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Track API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
