//! DSMovie API Server
//!
//! A movie catalog where authenticated users score movies and each movie keeps
//! a running average of its scores.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;



use adapters::{PostgresMovieRepository, PostgresScoreRepository, PostgresUserRepository};
use app::MovieService;
use config::Config;
use domain::ports::UserRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub movie_service: Arc<MovieService<PostgresMovieRepository>>,
    pub movie_repo: Arc<PostgresMovieRepository>,
    pub score_repo: Arc<PostgresScoreRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router without rate limiting
fn router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public catalog
        .route("/movies", get(handlers::list_movies))
        .route("/movies/:id", get(handlers::get_movie))
        // Protected routes
        .merge(
            Router::new()
                .route("/movies", post(handlers::insert_movie))
                .route(
                    "/movies/:id",
                    put(handlers::update_movie).delete(handlers::delete_movie),
                )
                .route("/scores", put(handlers::save_score))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::auth_middleware,
                )),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dsmovie_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DSMovie API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let movie_repo = Arc::new(PostgresMovieRepository::new(db.clone()));
    let score_repo = Arc::new(PostgresScoreRepository::new(db.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));

    // Create application services
    let movie_service = Arc::new(MovieService::new(movie_repo.clone()));

    let state = AppState {
        movie_service,
        movie_repo,
        score_repo,
        user_repo,
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    let app = router(state).layer(GovernorLayer {
        config: governor_config,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
