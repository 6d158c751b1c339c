//! Referral API Data Model
//!
//! Value shapes exchanged with the referral API. The API owns every field;
//! the dashboard only displays and forwards them, so all fields default
//! when absent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Signed-in user as returned by the register and login endpoints.
///
/// The typed fields are a parsed view. Serializing writes back the JSON the
/// API sent, untouched, so the persisted session round-trips verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_verified: bool,
    pub role: Option<String>,
    raw: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserFields {
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    is_verified: bool,
    #[serde(default)]
    role: Option<String>,
}

impl User {
    /// Parse the API's user object, keeping it as the stored form
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let fields = UserFields::deserialize(&raw)?;
        Ok(Self {
            id: fields.id,
            email: fields.email,
            full_name: fields.full_name,
            is_verified: fields.is_verified,
            role: fields.role,
            raw,
        })
    }

    /// The user object exactly as the API returned it
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Name to greet the user with, falling back to the email address
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(D::Error::custom)
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Aggregate referral data for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSummary {
    #[serde(default)]
    pub referral_code: String,
    #[serde(default)]
    pub referral_links: Vec<ReferralLink>,
    #[serde(default)]
    pub referred_users: u64,
    #[serde(default)]
    pub total_earnings: f64,
    #[serde(default)]
    pub pending_earnings: f64,
}

/// A shareable referral link for one target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralLink {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

// ============================================
// Request/Response envelopes
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<ReferralSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateCodeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned with non-2xx statuses. Servers vary between
/// `message` and `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_accepts_underscore_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "665f1c",
            "email": "ada@example.com",
            "fullName": "Ada Lovelace",
            "isVerified": true,
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.id, "665f1c");
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert!(user.is_verified);
        assert_eq!(user.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let raw = json!({
            "id": "u1",
            "email": "a@b.c",
            "isVerified": false,
            "createdAt": "2024-05-01T10:00:00Z"
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.raw()["createdAt"], json!("2024-05-01T10:00:00Z"));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_user_serializes_as_received() {
        let raw = json!({"_id": "665f1c", "email": "a@b.c"});
        let user = User::from_value(raw.clone()).unwrap();

        assert_eq!(user.id, "665f1c");
        assert!(!user.is_verified);
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_user_requires_id() {
        assert!(User::from_value(json!({"email": "a@b.c"})).is_err());
        assert!(User::from_value(json!("u1")).is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: User = serde_json::from_value(json!({"id": "u1", "email": "a@b.c", "fullName": " "})).unwrap();
        assert_eq!(user.display_name(), "a@b.c");
    }

    #[test]
    fn test_summary_defaults_missing_fields() {
        let summary: ReferralSummary = serde_json::from_value(json!({
            "referralCode": "ABC123",
            "referralLinks": [{"target": "app", "name": "App", "url": "https://x.io/r/ABC123"}]
        }))
        .unwrap();

        assert_eq!(summary.referral_code, "ABC123");
        assert_eq!(summary.referral_links.len(), 1);
        assert_eq!(summary.referred_users, 0);
        assert_eq!(summary.total_earnings, 0.0);
    }

    #[test]
    fn test_register_request_shape() {
        let body = RegisterRequest {
            email: "a@b.c".to_string(),
            full_name: "Ada".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"email": "a@b.c", "fullName": "Ada"})
        );
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody = serde_json::from_value(json!({"message": "User exists", "error": "x"})).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("User exists"));

        let body: ErrorBody = serde_json::from_value(json!({"error": "Bad request"})).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad request"));

        let body: ErrorBody = serde_json::from_value(json!({"message": ""})).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
