// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::analytics::{BudgetStatus, CategoryTotal, MonthlySummary, DEFAULT_TREND_MONTHS};
use crate::models::{Budget, BudgetPatch, Month, NewBudget};
use crate::web::error::ApiError;
use crate::web::extract::{ApiPath, ApiQuery, CurrentUser, ValidatedJson};
use crate::web::{AppState, MessageResponse};

fn parse_month(raw: &str) -> Result<Month, ApiError> {
    raw.parse::<Month>().map_err(|e| ApiError::bad_request(e.to_string()))
}

fn parse_optional_month(raw: Option<&str>) -> Result<Option<Month>, ApiError> {
    raw.map(str::trim).filter(|m| !m.is_empty()).map(parse_month).transpose()
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub months: Option<usize>,
    /// Last month of the window, defaults to the current month
    pub end: Option<String>,
}

pub async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(month): ApiPath<String>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let month = parse_month(&month)?;
    Ok(Json(state.db.monthly_summary(user.id, month)?))
}

pub async fn category_breakdown(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<Vec<CategoryTotal>>, ApiError> {
    let month = parse_optional_month(query.month.as_deref())?;
    Ok(Json(state.db.category_breakdown(user.id, month)?))
}

pub async fn monthly_trend(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<TrendQuery>,
) -> Result<Json<Vec<MonthlySummary>>, ApiError> {
    let end = parse_optional_month(query.end.as_deref())?.unwrap_or_else(Month::current);
    let months = query.months.unwrap_or(DEFAULT_TREND_MONTHS);
    Ok(Json(state.db.monthly_trend(user.id, end, months)?))
}

pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    let month = parse_optional_month(query.month.as_deref())?;
    Ok(Json(state.db.list_budgets(user.id, month)?))
}

/// Create the goal for a category and month, or replace its amount
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(new): ValidatedJson<NewBudget>,
) -> Result<Json<Budget>, ApiError> {
    let budget = state.db.upsert_budget(user.id, &new)?;
    info!(user_id = user.id, budget_id = budget.id, month = %budget.month, "Set budget");
    Ok(Json(budget))
}

pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(patch): ValidatedJson<BudgetPatch>,
) -> Result<Json<Budget>, ApiError> {
    state
        .db
        .update_budget(user.id, id, &patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Budget"))
}

pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_budget(user.id, id)? {
        return Err(ApiError::not_found("Budget"));
    }
    Ok(Json(MessageResponse::new("Budget deleted successfully")))
}

pub async fn budget_status(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(month): ApiPath<String>,
) -> Result<Json<Vec<BudgetStatus>>, ApiError> {
    let month = parse_month(&month)?;
    Ok(Json(state.db.budget_report(user.id, month)?))
}
