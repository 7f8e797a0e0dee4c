// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTTP error responses, rendered as `{"detail": "..."}`

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::MyMoneyError;

pub const CREDENTIALS_DETAIL: &str = "Could not validate credentials";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// 401 with a `WWW-Authenticate: Bearer` challenge
    Unauthorized(String),
    NotFound(String),
    Unprocessable(String),
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// The generic 401 used for every token failure
    pub fn credentials() -> Self {
        Self::Unauthorized(CREDENTIALS_DETAIL.to_string())
    }

    /// `what` names the resource, e.g. "Transaction"
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::Unprocessable(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::NotFound(what) => format!("{} not found", what),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::InternalError(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "detail": self.detail() }));
        match self {
            ApiError::Unauthorized(_) => {
                (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

impl From<MyMoneyError> for ApiError {
    fn from(err: MyMoneyError) -> Self {
        match err {
            MyMoneyError::Validation(msg) => ApiError::Unprocessable(msg),
            MyMoneyError::Conflict(msg) => ApiError::BadRequest(msg),
            MyMoneyError::NotFound(what) => ApiError::NotFound(what),
            MyMoneyError::Token(_) => ApiError::credentials(),
            other => {
                error!("Request failed: {}", other);
                ApiError::InternalError("Internal server error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::credentials().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        let body = tokio_test::block_on(to_bytes(response.into_body(), usize::MAX)).unwrap();
        assert_eq!(&body[..], br#"{"detail":"Could not validate credentials"}"#);
    }

    #[test]
    fn test_error_mapping() {
        let e: ApiError = MyMoneyError::NotFound("Transaction".to_string()).into();
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(e.detail(), "Transaction not found");

        let e: ApiError = MyMoneyError::validation("Amount must be greater than 0").into();
        assert_eq!(e.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let e: ApiError = MyMoneyError::Conflict("Username already taken".to_string()).into();
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);

        let e: ApiError = MyMoneyError::Corrupt("amount".to_string()).into();
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.detail(), "Internal server error");
    }
}
