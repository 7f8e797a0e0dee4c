// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTTP client for the MyMoney API

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::analytics::{BudgetStatus, CategoryTotal, MonthlySummary};
use crate::auth::AccessToken;
use crate::config::ClientConfig;
use crate::models::{
    Budget, Month, NewBudget, NewTransaction, NewUser, Transaction, TransactionFilter,
    TransactionPatch, User,
};
use crate::web::{HealthResponse, ImportSummary, MessageResponse};
use crate::{MyMoneyError, Result};

/// MyMoney API client
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct MonthParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<Month>,
}

#[derive(Serialize)]
struct TrendParams {
    months: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<Month>,
}

#[derive(Serialize)]
struct ImportParams<'a> {
    delimiter: &'a str,
    has_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_format: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Send `token` as the bearer credential on later requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authed(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(MyMoneyError::Remote {
            status: status.as_u16(),
            detail: error_detail(&text),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Check the server is reachable
    pub async fn health(&self) -> Result<HealthResponse> {
        self.send_json(self.client.get(self.url("/health")).timeout(Duration::from_secs(10)))
            .await
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        self.send_json(self.client.get(self.url("/api/categories"))).await
    }

    pub async fn register(&self, new: &NewUser) -> Result<User> {
        debug!("Registering {}", new.username);
        self.send_json(self.client.post(self.url("/api/users/register")).json(new))
            .await
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken> {
        let form = LoginForm { username, password };
        self.send_json(self.client.post(self.url("/token")).form(&form)).await
    }

    pub async fn me(&self) -> Result<User> {
        self.send_json(self.client.get(self.url("/api/users/me"))).await
    }

    pub async fn delete_account(&self) -> Result<MessageResponse> {
        self.send_json(self.client.delete(self.url("/api/users/me"))).await
    }

    pub async fn export_account(&self) -> Result<serde_json::Value> {
        self.send_json(self.client.get(self.url("/api/users/me/export"))).await
    }

    pub async fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.send_json(self.client.get(self.url("/api/transactions")).query(filter))
            .await
    }

    pub async fn add_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        self.send_json(self.client.post(self.url("/api/transactions")).json(new))
            .await
    }

    pub async fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let path = format!("/api/transactions/{}", id);
        self.send_json(self.client.put(self.url(&path)).json(patch)).await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<MessageResponse> {
        let path = format!("/api/transactions/{}", id);
        self.send_json(self.client.delete(self.url(&path))).await
    }

    /// Download every transaction as CSV
    pub async fn export_csv(&self) -> Result<String> {
        let response = self.send(self.client.get(self.url("/api/transactions/export"))).await?;
        Ok(response.text().await?)
    }

    pub async fn import_csv(
        &self,
        csv: String,
        delimiter: &str,
        has_header: bool,
        date_format: Option<&str>,
    ) -> Result<ImportSummary> {
        let params = ImportParams { delimiter, has_header, date_format };
        let request = self
            .client
            .post(self.url("/api/transactions/import"))
            .query(&params)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(csv);
        self.send_json(request).await
    }

    pub async fn monthly_summary(&self, month: Month) -> Result<MonthlySummary> {
        let path = format!("/api/analytics/monthly-summary/{}", month);
        self.send_json(self.client.get(self.url(&path))).await
    }

    pub async fn category_breakdown(&self, month: Option<Month>) -> Result<Vec<CategoryTotal>> {
        self.send_json(
            self.client
                .get(self.url("/api/analytics/category-breakdown"))
                .query(&MonthParam { month }),
        )
        .await
    }

    pub async fn monthly_trend(&self, months: usize, end: Option<Month>) -> Result<Vec<MonthlySummary>> {
        self.send_json(
            self.client
                .get(self.url("/api/analytics/monthly-trend"))
                .query(&TrendParams { months, end }),
        )
        .await
    }

    pub async fn list_budgets(&self, month: Option<Month>) -> Result<Vec<Budget>> {
        self.send_json(
            self.client
                .get(self.url("/api/analytics/budgets"))
                .query(&MonthParam { month }),
        )
        .await
    }

    pub async fn set_budget(&self, new: &NewBudget) -> Result<Budget> {
        self.send_json(self.client.post(self.url("/api/analytics/budgets")).json(new))
            .await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<MessageResponse> {
        let path = format!("/api/analytics/budgets/{}", id);
        self.send_json(self.client.delete(self.url(&path))).await
    }

    pub async fn budget_status(&self, month: Month) -> Result<Vec<BudgetStatus>> {
        let path = format!("/api/analytics/budget-status/{}", month);
        self.send_json(self.client.get(self.url(&path))).await
    }
}

/// The server's `detail` message, or the raw body when it is not JSON
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: serde_json::Value::String(msg) }) => msg,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "no details".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
