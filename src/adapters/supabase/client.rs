//! Supabase PostgREST client.
//!
//! Thin stateless HTTP layer shared by the store adapters. Every call is a
//! single REST request authenticated with the service role key; there is no
//! connection state, so the client is safe to use from any thread.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::ports::StoreError;

/// PostgREST client bound to one Supabase project.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    service_key: SecretString,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: SecretString::new(service_key.into()),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", self.service_key.expose_secret())
            .header(
                "Authorization",
                format!("Bearer {}", self.service_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
    }

    /// Inserts a row and returns the written representation.
    ///
    /// With `on_conflict` set, the insert is conditional: conflicting rows
    /// are skipped server-side and the returned list is empty, which is how
    /// callers detect "already exists" without a read-then-write race.
    pub async fn insert_returning(
        &self,
        table: &str,
        body: &Value,
        on_conflict: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        let mut request = self.authed(self.http.post(self.table_url(table))).json(body);

        if let Some(column) = on_conflict {
            request = request
                .query(&[("on_conflict", column)])
                .header("Prefer", "return=representation,resolution=ignore-duplicates");
        } else {
            request = request.header("Prefer", "return=representation");
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|e| StoreError::BadResponse(e.to_string()))?;
        Ok(normalize_rows(value))
    }

    /// Fires an insert without asking for the representation back.
    pub async fn insert_minimal(&self, table: &str, body: &Value) -> Result<(), StoreError> {
        let response = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Selects rows matching the given PostgREST filters.
    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .authed(self.http.get(self.table_url(table)))
            .query(filters)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::BadResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body: value.to_string(),
            });
        }
        Ok(normalize_rows(value))
    }

    /// Patches rows matching the given PostgREST filters.
    pub async fn patch(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &Value,
    ) -> Result<(), StoreError> {
        let response = self
            .authed(self.http.patch(self.table_url(table)))
            .query(filters)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Normalizes a PostgREST body that may be one record or a list of records.
pub fn normalize_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        single => vec![single],
    }
}
