//! The authenticated principal as a loosely typed record.
//!
//! DESIGN
//! ======
//! The backend owns the user schema and it differs between tenants, so the
//! record stays a JSON object. Accessors cover the handful of fields the
//! session layer itself reads (role, email verification, display name).

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::token::TokenClaims;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Map<String, Value>);

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Builder-style [`UserRecord::insert`].
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Shallow merge: top-level keys of `patch` replace ours.
    pub fn merge(&mut self, patch: UserRecord) {
        self.0.extend(patch.0);
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// Roles held by the user, read from `role` (string) and/or `roles` (list).
    pub fn roles(&self) -> Vec<String> {
        let mut roles = Vec::new();
        if let Some(role) = self.get_str("role") {
            roles.push(role.to_owned());
        }
        if let Some(Value::Array(items)) = self.0.get("roles") {
            roles.extend(items.iter().filter_map(Value::as_str).map(str::to_owned));
        }
        roles
    }

    /// Whether any of the user's roles appears in `allowed`.
    /// An empty allow-list admits everyone.
    pub fn has_any_role(&self, allowed: &[String]) -> bool {
        allowed.is_empty() || self.roles().iter().any(|role| allowed.contains(role))
    }

    /// `emailVerified: true` or a non-null `emailVerifiedAt`.
    pub fn email_verified(&self) -> bool {
        self.0.get("emailVerified").and_then(Value::as_bool).unwrap_or(false)
            || self.0.get("emailVerifiedAt").is_some_and(|v| !v.is_null())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.get_str("accessToken")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.get_str("displayName")
    }

    /// Stamp session fields and derived display fields onto the record.
    pub fn decorate(&mut self, token: &str, claims: Option<&TokenClaims>) {
        self.stamp_token(token, claims);
        if let Some(name) = self.derived_display_name() {
            self.insert("displayName", name);
        }
        if let Some(phone) = self.get_str("phone").map(str::to_owned) {
            self.insert("phoneNumber", phone);
        }
        if let Some(photo) = self.get_str("avatarUrl").map(str::to_owned) {
            self.insert("photoURL", photo);
        }
    }

    /// Replace `accessToken`, `exp` and `iat` after a token change.
    pub fn stamp_token(&mut self, token: &str, claims: Option<&TokenClaims>) {
        self.insert("accessToken", token);
        if let Some(claims) = claims {
            if let Some(exp) = claims.exp {
                self.insert("exp", exp);
            }
            if let Some(iat) = claims.iat {
                self.insert("iat", iat);
            }
        }
    }

    fn derived_display_name(&self) -> Option<String> {
        match (self.get_str("firstName"), self.get_str("lastName")) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.to_owned()),
            _ => self.get_str("name").or_else(|| self.email()).map(str::to_owned),
        }
    }
}
