// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::Session;
use crate::models::{Record, RecordInput, RecordKind, RecordPayload, User};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Your session has expired. Please log in again.")]
    SessionExpired { message: String },
    #[error("Not authorized: {message}")]
    Unauthorized { status: StatusCode, message: String },
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Only token problems end the session; other 401/403 responses leave it alone.
    pub fn is_session_ending(&self) -> bool {
        matches!(self, ApiError::SessionExpired { .. })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Map a failed response onto the client's error taxonomy.
pub fn classify(status: StatusCode, message: Option<String>) -> ApiError {
    let auth = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;
    match message {
        Some(message)
            if auth && (message.contains("token") || message.contains("Unauthorized")) =>
        {
            ApiError::SessionExpired { message }
        }
        message if auth => ApiError::Unauthorized {
            status,
            message: message.unwrap_or_else(|| "Access denied".to_string()),
        },
        message => ApiError::Server {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Request failed ({})", status)),
        },
    }
}

/// Persistence boundary for expenses and incomes.
pub trait RecordsApi {
    fn list(&self, kind: RecordKind) -> Result<Vec<Record>, ApiError>;
    fn create(&self, kind: RecordKind, input: &RecordInput) -> Result<Record, ApiError>;
    fn update(&self, kind: RecordKind, id: i64, input: &RecordInput) -> Result<Record, ApiError>;
    fn delete(&self, kind: RecordKind, id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LoginResponse {
    pub fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user: User {
                id: self.id,
                username: self.username,
                email: self.email,
                created_at: self.created_at,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let req = match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        };
        let resp = req.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error));
        let err = classify(status, message);
        tracing::debug!(%status, error = %err, "request failed");
        Err(err)
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn message(resp: Response, fallback: &str) -> Result<String, ApiError> {
        let text = resp.text()?;
        let msg = serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| fallback.to_string());
        Ok(msg)
    }

    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let resp = self.send(self.client.post(self.url("auth/register")).json(&body))?;
        Self::message(resp, "Registration completed")
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let resp = self.send(self.client.post(self.url("auth/login")).json(&body))?;
        Self::decode(resp)
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "refreshToken": refresh_token });
        let resp = self.send(self.client.post(self.url("auth/refresh")).json(&body))?;
        Self::decode(resp)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("auth/logout")))?;
        Ok(())
    }

    pub fn me(&self) -> Result<User, ApiError> {
        let resp = self.send(self.client.get(self.url("auth/me")))?;
        Self::decode(resp)
    }

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<String, ApiError> {
        let resp = self.send(self.client.put(self.url("auth/update")).json(update))?;
        Self::message(resp, "Profile updated successfully!")
    }
}

impl RecordsApi for ApiClient {
    fn list(&self, kind: RecordKind) -> Result<Vec<Record>, ApiError> {
        let resp = self.send(self.client.get(self.url(kind.wire_path())))?;
        let payloads: Vec<RecordPayload> = Self::decode(resp)?;
        tracing::info!(kind = %kind, count = payloads.len(), "fetched records");
        Ok(payloads
            .into_iter()
            .map(|p| Record::from_payload(kind, p))
            .collect())
    }

    fn create(&self, kind: RecordKind, input: &RecordInput) -> Result<Record, ApiError> {
        let req = self
            .client
            .post(self.url(kind.wire_path()))
            .json(&input.to_wire(kind));
        let payload: RecordPayload = Self::decode(self.send(req)?)?;
        tracing::info!(kind = %kind, id = payload.id, "created record");
        Ok(Record::from_payload(kind, payload))
    }

    fn update(&self, kind: RecordKind, id: i64, input: &RecordInput) -> Result<Record, ApiError> {
        let req = self
            .client
            .put(self.url(&format!("{}/{}", kind.wire_path(), id)))
            .json(&input.to_wire(kind));
        let payload: RecordPayload = Self::decode(self.send(req)?)?;
        tracing::info!(kind = %kind, id, "updated record");
        Ok(Record::from_payload(kind, payload))
    }

    fn delete(&self, kind: RecordKind, id: i64) -> Result<(), ApiError> {
        self.send(
            self.client
                .delete(self.url(&format!("{}/{}", kind.wire_path(), id))),
        )?;
        tracing::info!(kind = %kind, id, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let c = ApiClient::new(Client::new(), "http://host/api/", None);
        assert_eq!(c.url("/expenses"), "http://host/api/expenses");
        assert_eq!(c.url("auth/login"), "http://host/api/auth/login");
    }
}
