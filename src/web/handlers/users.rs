// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::auth::AccessToken;
use crate::db::UserExport;
use crate::models::{NewUser, User};
use crate::web::error::ApiError;
use crate::web::extract::{CurrentUser, ValidatedJson};
use crate::web::{AppState, MessageResponse};

/// Run password hashing on the blocking pool
async fn off_runtime<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!("Password hashing task failed: {}", e);
        ApiError::InternalError("Internal server error".to_string())
    })?;
    Ok(outcome?)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /token`
pub async fn login(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<AccessToken>, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let rejected = || ApiError::unauthorized("Incorrect username or password");

    let (user, stored_hash) = state
        .db
        .get_credentials(&form.username)?
        .ok_or_else(rejected)?;
    let auth = state.auth.clone();
    let password = form.password;
    let verified = off_runtime(move || auth.verify_password(&password, &stored_hash)).await?;
    if !verified {
        return Err(rejected());
    }
    if !user.is_active {
        return Err(ApiError::bad_request("Inactive user"));
    }

    info!(username = %user.username, "Issued access token");
    Ok(Json(state.auth.issue(&user.username)?))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(new): ValidatedJson<NewUser>,
) -> Result<Json<User>, ApiError> {
    if state.db.get_user_by_email(&new.email)?.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }
    if state.db.get_user_by_username(&new.username)?.is_some() {
        return Err(ApiError::bad_request("Username already taken"));
    }
    let auth = state.auth.clone();
    let password = new.password.clone();
    let hashed = off_runtime(move || auth.hash_password(&password)).await?;
    let user = state.db.create_user(&new.email, &new.username, &hashed)?;
    info!(user_id = user.id, username = %user.username, "Registered user");
    Ok(Json(user))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Removes the account together with its transactions and budgets
pub async fn delete_me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_user(user.id)? {
        return Err(ApiError::not_found("User"));
    }
    info!(user_id = user.id, "Deleted account");
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}

pub async fn export_me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserExport>, ApiError> {
    state
        .db
        .export_user(user.id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User"))
}
