mod auth;
mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod progress;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::jwt::JwtManager;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::config::AppConfig;
use crate::handlers::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "fintrack=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");

    // Connect to PostgreSQL
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url())
        .await?;
    tracing::info!("Connected to PostgreSQL");

    // Run migrations
    sqlx::raw_sql(include_str!("../migrations/001_initial_schema.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("Database migrations applied");

    // Initialize JWT manager
    let jwt = Arc::new(JwtManager::new(&config.auth.jwt_secret, config.auth.token_expiry_hours));

    // Create shared state
    let state = AppState {
        pool: pool.clone(),
        jwt: jwt.clone(),
        reset: config.reset.clone(),
    };

    let auth_state = AuthState { jwt: jwt.clone() };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/forgot-password", post(handlers::auth::forgot_password))
        .route("/api/verify-reset-code", post(handlers::auth::verify_reset_code))
        .route("/api/reset-password", post(handlers::auth::reset_password));

    // Protected routes (require auth)
    let protected_routes = Router::new()
        // Users
        .route("/api/user/:id", get(handlers::auth::get_user))
        // Reference data
        .route("/api/categories", get(handlers::reference::list_categories))
        .route("/api/payment-methods", get(handlers::reference::list_payment_methods))
        // Transactions
        .route("/api/income", get(handlers::transactions::list_income).post(handlers::transactions::create_income))
        .route("/api/expense", get(handlers::transactions::list_expense).post(handlers::transactions::create_expense))
        .route("/api/expense/total", get(handlers::transactions::expense_total))
        // Budgets (GET takes a user id, PUT takes a budget id)
        .route("/api/budgets", post(handlers::budgets::create))
        .route("/api/budgets/:id", get(handlers::budgets::list).put(handlers::budgets::update))
        .route("/api/budgets/:id/rollover", post(handlers::budgets::rollover))
        // Savings goals (GET takes a user id, PUT/DELETE take a goal id)
        .route("/api/savings-goals", post(handlers::goals::create))
        .route(
            "/api/savings-goals/:id",
            get(handlers::goals::list)
                .put(handlers::goals::update)
                .delete(handlers::goals::delete),
        )
        // Apply auth middleware
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    // Combine all routes
    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting FinTrack server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
