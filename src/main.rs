use axum::{middleware::from_fn, Router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patient_service::api::{health_routes, patient_routes};
use patient_service::clock::SystemClock;
use patient_service::config::Config;
use patient_service::middleware::track_request;
use patient_service::repository::PatientsRepository;
use patient_service::usecases::PatientsUseCases;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patient_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting patient service on {}", config.server_addr());

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations completed");

    // Explicit assembly: store, then use cases, then routes
    let repository = PatientsRepository::new(pool.clone());
    let usecases = Arc::new(PatientsUseCases::new(repository, Arc::new(SystemClock)));

    let app = Router::new()
        .merge(patient_routes(usecases))
        .merge(health_routes(Arc::new(pool)))
        .layer(from_fn(track_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server_addr()).await?;
    tracing::info!("Listening on {}", config.server_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
