//! REST API helpers for the `/auth/*` endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `AuthError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-OK responses become `AuthError::Http` carrying the server's own message
//! (see `error::server_error_message`); transport and decode failures become
//! `AuthError::Network`. Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::client::ApiClient;
use super::types::{AuthPayload, ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::error::AuthError;
use crate::state::user::UserRecord;

pub const SIGN_IN_PATH: &str = "/auth/sign-in";
pub const SIGN_UP_PATH: &str = "/auth/sign-up";
pub const ME_PATH: &str = "/auth/me";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const VERIFY_EMAIL_PATH: &str = "/auth/verify-email";
pub const CHECK_EMAIL_PATH: &str = "/auth/check-email";

/// Backend operations the session layer depends on.
///
/// Bearer-authenticated calls rely on the default header installed on the
/// shared [`ApiClient`].
pub trait AuthApi {
    /// `POST /auth/sign-in`.
    fn sign_in(&self, request: &SignInRequest) -> impl Future<Output = Result<AuthPayload, AuthError>>;

    /// `POST /auth/sign-up`.
    fn sign_up(&self, request: &SignUpRequest) -> impl Future<Output = Result<AuthPayload, AuthError>>;

    /// `GET /auth/me`.
    fn me(&self) -> impl Future<Output = Result<UserRecord, AuthError>>;

    /// `POST /auth/refresh`; yields the replacement token.
    fn refresh(&self) -> impl Future<Output = Result<String, AuthError>>;

    /// `POST /auth/logout`.
    fn logout(&self) -> impl Future<Output = Result<(), AuthError>>;

    /// `POST /auth/forgot-password`.
    fn forgot_password(&self, email: &str) -> impl Future<Output = Result<(), AuthError>>;

    /// `POST /auth/reset-password`.
    fn reset_password(&self, request: &ResetPasswordRequest) -> impl Future<Output = Result<(), AuthError>>;

    /// `POST /auth/verify-email`.
    fn verify_email(&self, token: &str) -> impl Future<Output = Result<(), AuthError>>;

    /// `POST /auth/check-email`; whether an account already uses `email`.
    fn check_email(&self, email: &str) -> impl Future<Output = Result<bool, AuthError>>;
}

/// [`AuthApi`] over HTTP through the shared client.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn decode_failed_message(endpoint: &str, detail: &str) -> String {
    format!("unexpected response from {endpoint}: {detail}")
}

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> AuthError {
    AuthError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    endpoint: &str,
    resp: gloo_net::http::Response,
) -> Result<T, AuthError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::from_response(status, &body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| AuthError::Network(decode_failed_message(endpoint, &e.to_string())))
}

#[cfg(feature = "hydrate")]
async fn expect_ok(resp: gloo_net::http::Response) -> Result<(), AuthError> {
    if resp.ok() {
        return Ok(());
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(AuthError::from_response(status, &body))
}

impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthPayload, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .client
                .post(SIGN_IN_PATH)
                .json(request)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let envelope: super::types::Envelope<AuthPayload> = read_json(SIGN_IN_PATH, resp).await?;
            Ok(envelope.data)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.client, request);
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthPayload, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .client
                .post(SIGN_UP_PATH)
                .json(request)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let envelope: super::types::Envelope<AuthPayload> = read_json(SIGN_UP_PATH, resp).await?;
            Ok(envelope.data)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(AuthError::Unavailable)
        }
    }

    async fn me(&self) -> Result<UserRecord, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self.client.get(ME_PATH).send().await.map_err(transport)?;
            let envelope: super::types::Envelope<UserRecord> = read_json(ME_PATH, resp).await?;
            Ok(envelope.data)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self.client.post(REFRESH_PATH).send().await.map_err(transport)?;
            let body: super::types::RefreshResponse = read_json(REFRESH_PATH, resp).await?;
            Ok(body.token)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self.client.post(LOGOUT_PATH).send().await.map_err(transport)?;
            expect_ok(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = super::types::EmailRequest { email: email.to_owned() };
            let resp = self
                .client
                .post(FORGOT_PASSWORD_PATH)
                .json(&body)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            expect_ok(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AuthError::Unavailable)
        }
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .client
                .post(RESET_PASSWORD_PATH)
                .json(request)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            expect_ok(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(AuthError::Unavailable)
        }
    }

    async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = super::types::VerifyEmailRequest { token: token.to_owned() };
            let resp = self
                .client
                .post(VERIFY_EMAIL_PATH)
                .json(&body)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            expect_ok(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(AuthError::Unavailable)
        }
    }

    async fn check_email(&self, email: &str) -> Result<bool, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = super::types::EmailRequest { email: email.to_owned() };
            let resp = self
                .client
                .post(CHECK_EMAIL_PATH)
                .json(&body)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let envelope: super::types::Envelope<super::types::CheckEmailResponse> =
                read_json(CHECK_EMAIL_PATH, resp).await?;
            Ok(envelope.data.exists)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AuthError::Unavailable)
        }
    }
}
