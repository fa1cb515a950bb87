//! # Cinelog Server
//!
//! Review service for a movie/TV catalog.
//!
//! ## Overview
//!
//! - **Catalog**: search, filter, and sort seeded titles with read-time
//!   rating aggregation
//! - **Reviews**: one star rating + write-up per user per title, with
//!   owner-only edit and delete
//! - **Accounts**: email/password registration with a paired public
//!   profile, access + refresh token flow
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for persistent storage
//! - argon2 password hashing and HS256 access tokens
//! - TMDB as the catalog source (see the `cinelog-seed` binary)

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::Json,
    routing::get,
};
use clap::Parser;
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinelog_core::database::PostgresDatabase;
use cinelog_server::{
    infra::{app_state::AppState, config::Config},
    routes,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinelog-server")]
#[command(about = "Review service API for a movie/TV catalog")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_file_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    let db = match PostgresDatabase::new(&config.database_url).await {
        Ok(db) => {
            info!("Successfully connected to PostgreSQL");
            db
        }
        Err(connect_error) => {
            error!(error = %connect_error, "PostgreSQL connection failed");
            return Err(anyhow::anyhow!(
                "Database connection failed: {}",
                connect_error
            ));
        }
    };

    db.initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database schema initialized successfully");

    let config = Arc::new(config);
    let state = AppState::new(Arc::new(db), Arc::clone(&config));
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!(
        "Starting Cinelog Server on {}:{}",
        config.server.host, config.server.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    let versioned_api = routes::create_api_router(state.clone());

    // Permissive CORS without an allow-list (development posture),
    // explicit origins otherwise.
    let cors_layer = if state.config.cors_allowed_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers(AllowHeaders::any())
    };

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .merge(versioned_api)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping_handler() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "ok",
        "message": "Cinelog Server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, StatusCode> {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.db.pool())
        .await
    {
        Ok(_) => {
            health_status["checks"]["database"] = json!({ "status": "healthy" });
            Ok(Json(health_status))
        }
        Err(e) => {
            warn!(error = %e, "health check failed against the database");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
