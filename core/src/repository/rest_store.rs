//! Hosted Store (PostgREST + GoTrue)
//!
//! Talks to the hosted database over its REST API. Table rows live under
//! `/rest/v1/{table}`, auth under `/auth/v1`. Every request carries the
//! anon key; once signed in the user's access token replaces it as bearer.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::traits::RemoteStore;
use crate::domain::{DomainError, DomainResult, OrderBy, Row, Table};
use crate::session::{AuthBackend, User};

pub struct PostgrestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl PostgrestStore {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: RwLock::new(None),
        }
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
    }

    /// Send a table request and decode the JSON array it answers with
    async fn send(&self, request: RequestBuilder) -> DomainResult<Vec<Row>> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }
        parse_rows(&body)
    }
}

// ========================
// Request shapes
// ========================

pub(crate) fn table_url(base_url: &str, table: Table) -> String {
    format!("{}/rest/v1/{}", base_url, table)
}

pub(crate) fn order_param(order: OrderBy) -> String {
    format!("{}.{}", order.column, if order.ascending { "asc" } else { "desc" })
}

pub(crate) fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

/// Empty bodies (204) decode to no rows
pub(crate) fn parse_rows(body: &str) -> DomainResult<Vec<Row>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| DomainError::Decode(e.to_string()))
}

/// PostgREST `{ message, code, details, hint }`, GoTrue `{ error_description }`
/// or `{ msg }`; anything else keeps the raw body
pub(crate) fn error_from_body(status: u16, body: &str) -> DomainError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        ["message", "error_description", "msg"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    });
    match message {
        Some(message) => DomainError::Remote(message),
        None if body.trim().is_empty() => DomainError::Remote(format!("HTTP {}", status)),
        None => DomainError::Remote(format!("HTTP {}: {}", status, body.trim())),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RemoteStore for PostgrestStore {
    async fn list(&self, table: Table, order: OrderBy) -> DomainResult<Vec<Row>> {
        let request = self
            .client
            .get(table_url(&self.base_url, table))
            .query(&[("select", "*".to_string()), ("order", order_param(order))]);
        let rows = self.send(request).await?;
        debug!(%table, count = rows.len(), "list");
        Ok(rows)
    }

    async fn insert(&self, table: Table, fields: Row) -> DomainResult<Row> {
        let request = self
            .client
            .post(table_url(&self.base_url, table))
            .header("Prefer", "return=representation")
            .json(&fields);
        let row = self
            .send(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Decode(format!("{}: insert returned no row", table)))?;
        debug!(%table, "insert");
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, fields: Row) -> DomainResult<Row> {
        let request = self
            .client
            .patch(table_url(&self.base_url, table))
            .query(&[("id", eq_filter(id))])
            .header("Prefer", "return=representation")
            .json(&fields);
        let row = self
            .send(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NotFound(format!("{}/{}", table, id)))?;
        debug!(%table, %id, "update");
        Ok(row)
    }

    async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
        let request = self
            .client
            .delete(table_url(&self.base_url, table))
            .query(&[("id", eq_filter(id))]);
        self.send(request).await?;
        debug!(%table, %id, "delete");
        Ok(())
    }

    async fn select_eq(&self, table: Table, column: &str, value: &str) -> DomainResult<Vec<Row>> {
        let request = self
            .client
            .get(table_url(&self.base_url, table))
            .query(&[("select", "*".to_string()), (column, eq_filter(value))]);
        let rows = self.send(request).await?;
        debug!(%table, column, count = rows.len(), "select_eq");
        Ok(rows)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: User,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthBackend for PostgrestStore {
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<User> {
        let response = self
            .client
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| DomainError::Decode(e.to_string()))?;
        self.set_token(Some(token.access_token));
        Ok(token.user)
    }

    async fn sign_out(&self) -> DomainResult<()> {
        let result = self
            .authorized(self.client.post(format!("{}/auth/v1/logout", self.base_url)))
            .send()
            .await;
        // The token is dropped locally whatever the server says
        self.set_token(None);

        let response = result.map_err(|e| DomainError::Remote(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "logout rejected");
            return Err(error_from_body(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_and_order() {
        let store = PostgrestStore::new("https://example.supabase.co/", "anon");
        assert_eq!(
            table_url(&store.base_url, Table::FixedExpenses),
            "https://example.supabase.co/rest/v1/fixed_expenses"
        );
        assert_eq!(order_param(OrderBy::desc("created_at")), "created_at.desc");
        assert_eq!(order_param(OrderBy::asc("number")), "number.asc");
        assert_eq!(eq_filter("3f1c"), "eq.3f1c");
    }

    #[test]
    fn test_postgrest_error_message() {
        let body = concat!(
            r#"{"code":"23505","details":null,"hint":null,"#,
            r#""message":"duplicate key value violates unique constraint \"flats_number_key\""}"#
        );
        assert_eq!(
            error_from_body(409, body),
            DomainError::Remote(
                "duplicate key value violates unique constraint \"flats_number_key\"".into()
            )
        );
    }

    #[test]
    fn test_gotrue_error_message() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            error_from_body(400, body),
            DomainError::Remote("Invalid login credentials".into())
        );
    }

    #[test]
    fn test_non_json_error_keeps_status() {
        assert_eq!(
            error_from_body(502, "Bad Gateway"),
            DomainError::Remote("HTTP 502: Bad Gateway".into())
        );
        assert_eq!(error_from_body(500, ""), DomainError::Remote("HTTP 500".into()));
    }

    #[test]
    fn test_parse_rows() {
        assert!(parse_rows("").unwrap().is_empty());
        let rows = parse_rows(r#"[{"id":"1","number":"A-101"}]"#).unwrap();
        assert_eq!(rows[0].get("number"), Some(&serde_json::json!("A-101")));
        assert!(matches!(parse_rows("{oops"), Err(DomainError::Decode(_))));
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let store = PostgrestStore::new("https://example.supabase.co", "anon");
        assert_eq!(store.bearer(), "anon");
        store.set_token(Some("jwt".into()));
        assert_eq!(store.bearer(), "jwt");
    }
}
