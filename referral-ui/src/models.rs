//! API Data Types
//!
//! Shapes returned by the referral API. Fields default when absent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Signed-in user. Serializes back to the exact object the API sent, so
/// the stored session matches it.
#[derive(Clone, Debug, PartialEq)]
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
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let fields = UserFields::deserialize(&raw).map_err(D::Error::custom)?;
        Ok(Self {
            id: fields.id,
            email: fields.email,
            full_name: fields.full_name,
            is_verified: fields.is_verified,
            role: fields.role,
            raw,
        })
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralLink {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Which form the signed-out view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_api() {
        let user: User = serde_json::from_str(
            r#"{"_id":"abc","email":"a@b.c","fullName":"","isVerified":true,"role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "abc");
        assert_eq!(user.display_name(), "a@b.c");
    }

    #[test]
    fn test_user_serializes_as_received() {
        let raw = r#"{"_id":"abc","email":"a@b.c","referredBy":null}"#;
        let user: User = serde_json::from_str(raw).unwrap();

        let back: Value = serde_json::to_value(&user).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(raw).unwrap());
    }

    #[test]
    fn test_auth_mode_toggle() {
        assert_eq!(AuthMode::default().toggled(), AuthMode::Register);
        assert_eq!(AuthMode::Register.toggled(), AuthMode::Login);
    }
}
