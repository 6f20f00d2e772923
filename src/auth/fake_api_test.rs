//! In-memory `AuthApi` and token builders shared by the auth tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::AuthError;
use crate::net::api::AuthApi;
use crate::net::client::ApiClient;
use crate::net::types::{AuthPayload, ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::state::user::UserRecord;
use crate::util::time::{now_secs, sleep_ms};

pub(crate) fn token_with_exp(exp: i64) -> String {
    token_with(&serde_json::json!({ "sub": "1", "exp": exp, "iat": exp - 3600 }))
}

pub(crate) fn token_with(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2ln")
}

/// Token valid for another hour.
pub(crate) fn fresh_token() -> String {
    token_with_exp(now_secs() + 3600)
}

/// Token that expired a minute ago.
pub(crate) fn expired_token() -> String {
    token_with_exp(now_secs() - 60)
}

/// Token inside the 5-minute refresh window.
pub(crate) fn expiring_token() -> String {
    token_with_exp(now_secs() + 120)
}

pub(crate) struct FakeApi {
    client: ApiClient,
    pub me_calls: Cell<usize>,
    pub refresh_calls: Cell<usize>,
    pub logout_calls: Cell<usize>,
    pub me_authorization: RefCell<Vec<Option<String>>>,
    pub me_result: RefCell<Result<UserRecord, AuthError>>,
    pub sign_in_result: RefCell<Result<AuthPayload, AuthError>>,
    pub refresh_result: RefCell<Result<String, AuthError>>,
    pub logout_result: RefCell<Result<(), AuthError>>,
    pub verify_result: RefCell<Result<(), AuthError>>,
}

impl FakeApi {
    pub(crate) fn new(client: &ApiClient) -> Rc<Self> {
        Rc::new(Self {
            client: client.clone(),
            me_calls: Cell::new(0),
            refresh_calls: Cell::new(0),
            logout_calls: Cell::new(0),
            me_authorization: RefCell::new(Vec::new()),
            me_result: RefCell::new(Ok(UserRecord::new()
                .with("id", 7)
                .with("firstName", "Ana")
                .with("email", "ana@imob.test")
                .with("role", "agent")
                .with("phone", "81999990000"))),
            sign_in_result: RefCell::new(Err(AuthError::Unavailable)),
            refresh_result: RefCell::new(Err(AuthError::Unavailable)),
            logout_result: RefCell::new(Ok(())),
            verify_result: RefCell::new(Ok(())),
        })
    }
}

impl AuthApi for Rc<FakeApi> {
    async fn sign_in(&self, _request: &SignInRequest) -> Result<AuthPayload, AuthError> {
        sleep_ms(0).await;
        self.sign_in_result.borrow().clone()
    }

    async fn sign_up(&self, _request: &SignUpRequest) -> Result<AuthPayload, AuthError> {
        sleep_ms(0).await;
        self.sign_in_result.borrow().clone()
    }

    async fn me(&self) -> Result<UserRecord, AuthError> {
        self.me_calls.set(self.me_calls.get() + 1);
        self.me_authorization.borrow_mut().push(self.client.authorization());
        sleep_ms(0).await;
        self.me_result.borrow().clone()
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        self.refresh_calls.set(self.refresh_calls.get() + 1);
        sleep_ms(0).await;
        self.refresh_result.borrow().clone()
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        self.logout_result.borrow().clone()
    }

    async fn forgot_password(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> Result<(), AuthError> {
        Ok(())
    }

    async fn verify_email(&self, _token: &str) -> Result<(), AuthError> {
        self.verify_result.borrow().clone()
    }

    async fn check_email(&self, email: &str) -> Result<bool, AuthError> {
        Ok(email == "ana@imob.test")
    }
}
