// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::csv_io::{self, ImportOptions};
use crate::models::{NewTransaction, Transaction, TransactionFilter, TransactionPatch};
use crate::web::error::ApiError;
use crate::web::extract::{ApiPath, ApiQuery, CurrentUser, ValidatedJson};
use crate::web::{AppState, ImportSummary, MessageResponse};

const NOT_FOUND: &str = "Transaction";

pub async fn list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(filter): ApiQuery<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let txns = state
        .db
        .list_transactions(user.id, &filter, state.config.web.max_page_size)?;
    Ok(Json(txns))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(new): ValidatedJson<NewTransaction>,
) -> Result<Json<Transaction>, ApiError> {
    let txn = state.db.create_transaction(user.id, &new)?;
    info!(user_id = user.id, transaction_id = txn.id, "Created transaction");
    Ok(Json(txn))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Transaction>, ApiError> {
    state
        .db
        .get_transaction(user.id, id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(patch): ValidatedJson<TransactionPatch>,
) -> Result<Json<Transaction>, ApiError> {
    state
        .db
        .update_transaction(user.id, id, &patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_transaction(user.id, id)? {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!(user_id = user.id, transaction_id = id, "Deleted transaction");
    Ok(Json(MessageResponse::new("Transaction deleted successfully")))
}

/// Every transaction of the caller as CSV
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, ApiError> {
    let txns = state.db.all_transactions(user.id)?;
    let body = csv_io::export_transactions(&txns)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"transactions.csv\""),
        ],
        body,
    )
        .into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    pub delimiter: Option<String>,
    pub date_format: Option<String>,
    pub has_header: Option<bool>,
}

impl ImportQuery {
    fn options(&self) -> Result<ImportOptions, ApiError> {
        let mut options = ImportOptions::default();
        if let Some(delimiter) = &self.delimiter {
            options.delimiter = csv_io::parse_delimiter(delimiter)?;
        }
        if let Some(has_header) = self.has_header {
            options.has_header = has_header;
        }
        options.date_format = self.date_format.clone().filter(|f| !f.trim().is_empty());
        Ok(options)
    }
}

/// Store every row of an uploaded CSV, or none of them
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<ImportQuery>,
    body: String,
) -> Result<Json<ImportSummary>, ApiError> {
    let options = query.options()?;
    let rows = csv_io::parse_import(&body, &options).map_err(|e| match e {
        crate::MyMoneyError::Csv(csv_err) => ApiError::unprocessable(format!("Invalid CSV: {}", csv_err)),
        other => other.into(),
    })?;
    let imported = state.db.insert_transactions(user.id, &rows)?;
    info!(user_id = user.id, imported, "Imported transactions from CSV");
    Ok(Json(ImportSummary { imported }))
}
