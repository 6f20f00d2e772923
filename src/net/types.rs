//! Wire DTOs for the `/auth/*` REST endpoints.
//!
//! DESIGN
//! ======
//! The backend speaks camelCase JSON and wraps most payloads in `{ "data": ... }`.
//! Request bodies serialize optional fields only when set.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::user::UserRecord;

/// `{ "data": T }` response wrapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Body of `POST /auth/sign-in`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/sign-up`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
}

/// `data` of a successful sign-in or sign-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    #[serde(default)]
    pub user: UserRecord,
}

/// Response of `POST /auth/refresh`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Body of `POST /auth/forgot-password` and `POST /auth/check-email`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Body of `POST /auth/reset-password`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body of `POST /auth/verify-email`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// `data` of `POST /auth/check-email`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}
