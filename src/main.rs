//! Travel Listing Backend
//!
//! A production-grade REST backend with SQLite persistence for travel
//! destinations, their embedded comments, and partner records.

mod api;
mod auth;
mod comments;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, options, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::IdentityProvider;
use comments::CommentManager;
use config::Config;
use db::DocumentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub comments: CommentManager,
    pub identity: IdentityProvider,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Travel Listing Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let store = DocumentStore::new(pool);

    // Provision the bootstrap admin account
    match &config.admin_token {
        Some(token) => {
            let admin = store.ensure_admin_user(token).await?;
            tracing::info!("Bootstrap admin user ready (id {})", admin.id);
        }
        None => {
            tracing::warn!(
                "No admin token configured (TRAVEL_ADMIN_TOKEN). Admin routes stay locked until a user record is provisioned!"
            );
        }
    }

    // Create application state
    let state = AppState {
        comments: CommentManager::new(store.clone()),
        identity: IdentityProvider::new(store.clone()),
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration; a configured origin list narrows the default
    // allow-anything policy
    let cors = match &state.config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    // API routes
    let api_routes = Router::new()
        // Destinations
        .route("/destinations", options(api::preflight))
        .route("/destinations", get(api::list_destinations))
        .route("/destinations", post(api::create_destination))
        .route("/destinations", put(api::method_not_supported))
        .route("/destinations", delete(api::delete_all_destinations))
        .route("/destinations/{id}", options(api::preflight))
        .route("/destinations/{id}", get(api::get_destination))
        .route("/destinations/{id}", post(api::method_not_supported))
        .route("/destinations/{id}", put(api::update_destination))
        .route("/destinations/{id}", delete(api::delete_destination))
        // Comments
        .route("/destinations/{id}/comments", options(api::preflight))
        .route("/destinations/{id}/comments", get(api::list_comments))
        .route("/destinations/{id}/comments", post(api::create_comment))
        .route("/destinations/{id}/comments", put(api::method_not_supported))
        .route("/destinations/{id}/comments", delete(api::delete_comments))
        .route(
            "/destinations/{id}/comments/{comment_id}",
            options(api::preflight),
        )
        .route(
            "/destinations/{id}/comments/{comment_id}",
            get(api::get_comment),
        )
        .route(
            "/destinations/{id}/comments/{comment_id}",
            post(api::method_not_supported),
        )
        .route(
            "/destinations/{id}/comments/{comment_id}",
            put(api::update_comment),
        )
        .route(
            "/destinations/{id}/comments/{comment_id}",
            delete(api::delete_comment),
        )
        // Partners
        .route("/partners", options(api::preflight))
        .route("/partners", get(api::list_partners))
        .route("/partners", post(api::create_partner))
        .route("/partners", put(api::method_not_supported))
        .route("/partners", delete(api::delete_all_partners))
        .route("/partners/{id}", options(api::preflight))
        .route("/partners/{id}", get(api::get_partner))
        .route("/partners/{id}", post(api::method_not_supported))
        .route("/partners/{id}", put(api::update_partner))
        .route("/partners/{id}", delete(api::delete_partner))
        // Resolve the caller's identity once per request
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::attach_identity,
        ));

    // Health check (no identity resolution)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
