// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTTP API for MyMoney

pub mod error;
pub mod extract;
mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::db::Database;
use crate::{MyMoneyError, Result};

pub use error::ApiError;

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub auth: Authenticator,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Result<Self> {
        let auth = Authenticator::new(&config.auth)?;
        Ok(Self { db, config, auth })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/token", post(handlers::users::login))
        .route("/api/categories", get(handlers::categories))
        // Users
        .route("/api/users/register", post(handlers::users::register))
        .route("/api/users/me", get(handlers::users::me).delete(handlers::users::delete_me))
        .route("/api/users/me/export", get(handlers::users::export_me))
        // Transactions
        .route(
            "/api/transactions",
            get(handlers::transactions::list).post(handlers::transactions::create),
        )
        .route("/api/transactions/export", get(handlers::transactions::export_csv))
        .route("/api/transactions/import", post(handlers::transactions::import_csv))
        .route(
            "/api/transactions/:id",
            get(handlers::transactions::get_one)
                .put(handlers::transactions::update)
                .delete(handlers::transactions::delete),
        )
        // Analytics
        .route("/api/analytics/monthly-summary/:month", get(handlers::analytics::monthly_summary))
        .route("/api/analytics/category-breakdown", get(handlers::analytics::category_breakdown))
        .route("/api/analytics/monthly-trend", get(handlers::analytics::monthly_trend))
        .route(
            "/api/analytics/budgets",
            get(handlers::analytics::list_budgets).post(handlers::analytics::set_budget),
        )
        .route(
            "/api/analytics/budgets/:id",
            put(handlers::analytics::update_budget).delete(handlers::analytics::delete_budget),
        )
        .route("/api/analytics/budget-status/:month", get(handlers::analytics::budget_status))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the web server with config and database
pub async fn start_server(config: AppConfig, db: Database) -> Result<()> {
    if config.uses_default_secret() {
        warn!("SECRET_KEY is the built-in default; set it before exposing the server");
    }
    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = Arc::new(AppState::new(config, db)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("{} listening on http://{}", state.config.app_name, addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MyMoneyError::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
