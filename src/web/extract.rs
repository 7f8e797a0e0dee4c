// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Request extractors with JSON error bodies

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::error::ApiError;
use super::AppState;
use crate::auth::bearer_token;
use crate::models::{User, Validate};

/// The active user named by the request's bearer token
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::credentials)?;
        let token = bearer_token(header).ok_or_else(ApiError::credentials)?;

        let claims = state.auth.decode(token).map_err(|e| {
            debug!("Rejected access token: {}", e);
            ApiError::credentials()
        })?;

        let user = state
            .db
            .get_user_by_username(&claims.sub)?
            .ok_or_else(ApiError::credentials)?;
        if !user.is_active {
            return Err(ApiError::bad_request("Inactive user"));
        }
        Ok(CurrentUser(user))
    }
}

/// JSON body that passed [`Validate`]. Syntax errors are 400, type and rule
/// failures 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| match rejection {
            JsonRejection::JsonDataError(e) => ApiError::unprocessable(e.body_text()),
            other => ApiError::bad_request(other.body_text()),
        })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameters; a malformed segment is 422
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ApiPath(value))
            .map_err(|rejection: PathRejection| ApiError::unprocessable(rejection.body_text()))
    }
}

/// Query string; a malformed parameter is 422
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection: QueryRejection| ApiError::unprocessable(rejection.body_text()))
    }
}
