//! Referral API Client
//!
//! HTTP client for the referral API's admin endpoints.
//!
//! The summary and code endpoints authenticate with the raw user id as a
//! bearer token. Anyone holding the id can act as that user; the API accepts
//! nothing stronger.

use crate::models::{
    AuthResponse, ErrorBody, GenerateCodeResponse, LoginRequest, ReferralSummary,
    RegisterRequest, SummaryResponse, User,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Operations the dashboard needs from the referral API
#[async_trait]
pub trait ReferralApi: Send + Sync {
    /// Create an account and return the new user
    async fn register(&self, email: &str, full_name: &str) -> Result<User, ClientError>;

    /// Sign in with an email and return the user
    async fn login(&self, email: &str) -> Result<User, ClientError>;

    /// Fetch the referral summary for a user
    async fn summary(&self, user_id: &str) -> Result<ReferralSummary, ClientError>;

    /// Ask the API to generate a new referral code. The summary has to be
    /// fetched again to see it.
    async fn generate_code(&self, user_id: &str) -> Result<(), ClientError>;
}

/// Configuration for the referral API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including any path prefix (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed referral API client
pub struct ReferralClient {
    client: Client,
    config: ClientConfig,
}

impl ReferralClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(classify)?;
        decode(response).await
    }
}

#[async_trait]
impl ReferralApi for ReferralClient {
    async fn register(&self, email: &str, full_name: &str) -> Result<User, ClientError> {
        tracing::debug!(email, "Registering");

        let body = RegisterRequest {
            email: email.to_string(),
            full_name: full_name.to_string(),
        };
        let request = self.client.post(self.url("/auth/admin/register")).json(&body);

        let response: AuthResponse = self.send(request).await?;
        auth_user(response)
    }

    async fn login(&self, email: &str) -> Result<User, ClientError> {
        tracing::debug!(email, "Logging in");

        let body = LoginRequest {
            email: email.to_string(),
        };
        let request = self.client.post(self.url("/auth/admin/login")).json(&body);

        let response: AuthResponse = self.send(request).await?;
        auth_user(response)
    }

    async fn summary(&self, user_id: &str) -> Result<ReferralSummary, ClientError> {
        tracing::debug!(user_id, "Fetching referral summary");

        let request = self
            .client
            .get(self.url("/referral/admin/summary"))
            .bearer_auth(user_id);

        let response: SummaryResponse = self.send(request).await?;
        if !response.success {
            return Err(ClientError::Rejected(response.message));
        }
        response.data.ok_or(ClientError::MissingPayload("data"))
    }

    async fn generate_code(&self, user_id: &str) -> Result<(), ClientError> {
        tracing::debug!(user_id, "Requesting new referral code");

        let request = self
            .client
            .get(self.url("/referral/admin/code"))
            .bearer_auth(user_id);

        let response: GenerateCodeResponse = self.send(request).await?;
        if response.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(response.message))
        }
    }
}

fn auth_user(response: AuthResponse) -> Result<User, ClientError> {
    if !response.success {
        return Err(ClientError::Rejected(response.message));
    }
    response.user.ok_or(ClientError::MissingPayload("user"))
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response.json().await.map_err(ClientError::Request);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message);

    tracing::debug!(status = status.as_u16(), body = %text, "Referral API returned an error");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the referral API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Referral API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    #[error("Response is missing `{0}`")]
    MissingPayload(&'static str),
}

impl ClientError {
    /// Message supplied by the server, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } | ClientError::Rejected(message) => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ReferralClient::new(ClientConfig {
            base_url: "http://api.test/v1/".to_string(),
            request_timeout_ms: 1000,
        })
        .unwrap();

        assert_eq!(
            client.url("/referral/admin/summary"),
            "http://api.test/v1/referral/admin/summary"
        );
    }

    #[test]
    fn test_server_message() {
        let err = ClientError::Api {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.server_message(), Some("Email already registered"));
        assert_eq!(err.to_string(), "API error 409: Email already registered");

        assert_eq!(ClientError::Rejected(None).server_message(), None);
        assert_eq!(ClientError::Rejected(Some("  ".into())).server_message(), None);
        assert_eq!(ClientError::Timeout.server_message(), None);
    }

    #[test]
    fn test_auth_user_requires_success_and_user() {
        let rejected = AuthResponse {
            success: false,
            user: None,
            message: Some("User not found".to_string()),
        };
        let err = auth_user(rejected).unwrap_err();
        assert_eq!(err.server_message(), Some("User not found"));

        let empty = AuthResponse {
            success: true,
            user: None,
            message: None,
        };
        assert!(matches!(auth_user(empty), Err(ClientError::MissingPayload("user"))));
    }
}
