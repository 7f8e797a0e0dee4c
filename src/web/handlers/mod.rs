// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

pub mod analytics;
pub mod transactions;
pub mod users;

use axum::{extract::State, Json};
use std::sync::Arc;

use super::{AppState, HealthResponse};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Suggested categories for new transactions
pub async fn categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.config.categories.clone())
}
