//! HTTP API Client
//!
//! One function per referral API endpoint. Failures come back as the
//! message to show the user.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::models::{ReferralSummary, User};

/// Base URL, fixed at build time through `REFERRAL_API_BASE`
pub const API_BASE: &str = match option_env!("REFERRAL_API_BASE") {
    Some(base) => base,
    None => "http://localhost:5000/api",
};

/// Shown when a submission fails without a server message
pub const SUBMIT_FALLBACK: &str = "Something went wrong. Please try again.";

/// Shown when code generation fails without a server message
pub const GENERATE_FALLBACK: &str = "Failed to generate referral code";

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct AuthResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ReferralSummary>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct GenerateCodeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ============ API Functions ============

/// Create an account
pub async fn register(email: &str, full_name: &str) -> Result<User, String> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct RegisterRequest<'a> {
        email: &'a str,
        full_name: &'a str,
    }

    let response = Request::post(&format!("{}/auth/admin/register", API_BASE))
        .json(&RegisterRequest { email, full_name })
        .map_err(|_| SUBMIT_FALLBACK.to_string())?
        .send()
        .await
        .map_err(|_| SUBMIT_FALLBACK.to_string())?;

    let body: AuthResponse = decode(response, SUBMIT_FALLBACK).await?;
    auth_user(body)
}

/// Sign in with an email
pub async fn login(email: &str) -> Result<User, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest<'a> {
        email: &'a str,
    }

    let response = Request::post(&format!("{}/auth/admin/login", API_BASE))
        .json(&LoginRequest { email })
        .map_err(|_| SUBMIT_FALLBACK.to_string())?
        .send()
        .await
        .map_err(|_| SUBMIT_FALLBACK.to_string())?;

    let body: AuthResponse = decode(response, SUBMIT_FALLBACK).await?;
    auth_user(body)
}

/// Fetch the referral summary. The user id doubles as the bearer token.
pub async fn fetch_summary(user_id: &str) -> Result<ReferralSummary, String> {
    let response = Request::get(&format!("{}/referral/admin/summary", API_BASE))
        .header("Authorization", &format!("Bearer {}", user_id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let body: SummaryResponse = decode(response, "Failed to load referral data").await?;
    if !body.success {
        return Err(body.message.unwrap_or_else(|| "Failed to load referral data".to_string()));
    }
    body.data.ok_or_else(|| "Failed to load referral data".to_string())
}

/// Ask for a new referral code. Fetch the summary afterwards to see it.
pub async fn generate_code(user_id: &str) -> Result<(), String> {
    let response = Request::get(&format!("{}/referral/admin/code", API_BASE))
        .header("Authorization", &format!("Bearer {}", user_id))
        .send()
        .await
        .map_err(|_| GENERATE_FALLBACK.to_string())?;

    let body: GenerateCodeResponse = decode(response, GENERATE_FALLBACK).await?;
    if body.success {
        Ok(())
    } else {
        Err(body.message.unwrap_or_else(|| GENERATE_FALLBACK.to_string()))
    }
}

fn auth_user(body: AuthResponse) -> Result<User, String> {
    if !body.success {
        return Err(body.message.unwrap_or_else(|| SUBMIT_FALLBACK.to_string()));
    }
    body.user.ok_or_else(|| SUBMIT_FALLBACK.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, String> {
    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(error_message(&text).unwrap_or_else(|| fallback.to_string()));
    }

    response.json().await.map_err(|_| fallback.to_string())
}

/// Server-supplied message from an error body, if any
fn error_message(body: &str) -> Option<String> {
    let error: ApiError = serde_json::from_str(body).ok()?;
    error.message.or(error.error).filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"User not found"}"#).as_deref(),
            Some("User not found")
        );
        assert_eq!(error_message(r#"{"error":"Bad email"}"#).as_deref(), Some("Bad email"));
        assert_eq!(error_message(r#"{"message":""}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }

    #[test]
    fn test_auth_user_fallback() {
        let body = AuthResponse {
            success: false,
            user: None,
            message: None,
        };
        assert_eq!(auth_user(body).unwrap_err(), SUBMIT_FALLBACK);
    }
}
