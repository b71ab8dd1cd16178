//! reserva-gateway server entry point.
//!
//! Starts the Axum HTTP server after running database migrations.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use reserva_gateway::api;
use reserva_gateway::app_state::AppState;
use reserva_gateway::config::GatewayConfig;
use reserva_gateway::identity::HttpIdentityGateway;
use reserva_gateway::notify::{NotificationDispatcher, ResendMailer};
use reserva_gateway::service::{FeedService, RatingService, ReservationService};
use reserva_gateway::store::postgres::PostgresStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting reserva-gateway");

    // Connect to PostgreSQL and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("database migrations applied");

    // Build persistence and outbound clients
    let store = Arc::new(PostgresStore::new(pool));
    let mailer = ResendMailer::new(config.resend_api_key.clone(), &config.resend_domain);
    let identity = Arc::new(HttpIdentityGateway::new(
        config.auth_base_url.clone(),
        config.auth_api_key.clone(),
    ));

    // Build service layer
    let reservations = Arc::new(ReservationService::new(
        Arc::clone(&store),
        NotificationDispatcher::new(mailer),
    ));
    let ratings = Arc::new(RatingService::new(Arc::clone(&store)));
    let feed = Arc::new(FeedService::new(store));

    // Build application state
    let app_state = AppState {
        reservations,
        ratings,
        feed,
        identity,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
