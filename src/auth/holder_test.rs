use super::*;
use crate::auth::fake_api_test::{FakeApi, expired_token, fresh_token, token_with};
use crate::auth::storage::MemoryStorage;
use crate::net::types::AuthPayload;
use futures::executor::block_on;

const KEY: &str = "jwt_access_token";

type TestHolder = SessionHolder<Rc<FakeApi>, MemoryStorage>;

fn setup() -> (TestHolder, Rc<FakeApi>, MemoryStorage) {
    let client = ApiClient::new("/api");
    let api = FakeApi::new(&client);
    let storage = MemoryStorage::new();
    let holder = SessionHolder::new(Rc::clone(&api), storage.clone(), client, &AuthConfig::default());
    (holder, api, storage)
}

// =============================================================
// Initial session check
// =============================================================

#[test]
fn starts_loading() {
    let (holder, _, _) = setup();
    assert!(holder.state().loading);
    assert!(holder.state().user.is_none());
}

#[test]
fn valid_token_and_me_success_authenticates_with_merged_claims() {
    let (holder, api, storage) = setup();
    let token = fresh_token();
    storage.set(KEY, &token).unwrap();

    block_on(holder.check_user_session());

    let state = holder.state();
    assert!(state.is_authenticated());
    assert!(!state.loading);
    let user = state.user.unwrap();
    assert_eq!(user.access_token(), Some(token.as_str()));
    let claims = token::decode(&token).unwrap();
    assert_eq!(user.get("exp").and_then(serde_json::Value::as_i64), claims.exp);
    assert_eq!(user.get("iat").and_then(serde_json::Value::as_i64), claims.iat);
    assert_eq!(user.display_name(), Some("Ana"));
    assert_eq!(user.get_str("phoneNumber"), Some("81999990000"));
    assert_eq!(api.me_calls.get(), 1);
}

#[test]
fn me_request_carries_bearer_header_after_reload() {
    let (holder, api, storage) = setup();
    let token = fresh_token();
    storage.set(KEY, &token).unwrap();
    assert_eq!(holder.client().authorization(), None);

    block_on(holder.check_user_session());

    assert_eq!(api.me_authorization.borrow().as_slice(), &[Some(format!("Bearer {token}"))]);
}

#[test]
fn missing_token_settles_unauthenticated_without_request() {
    let (holder, api, storage) = setup();
    block_on(holder.check_user_session());
    let state = holder.state();
    assert!(state.is_unauthenticated());
    assert!(!state.loading);
    assert!(!storage.contains(KEY));
    assert_eq!(api.me_calls.get(), 0);
}

#[test]
fn expired_token_is_cleared_and_unauthenticated() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &expired_token()).unwrap();
    holder.client().set_bearer("stale");

    block_on(holder.check_user_session());

    assert!(holder.state().is_unauthenticated());
    assert!(!holder.state().loading);
    assert!(!storage.contains(KEY));
    assert_eq!(holder.client().authorization(), None);
    assert_eq!(api.me_calls.get(), 0);
}

#[test]
fn malformed_token_is_cleared() {
    let (holder, _, storage) = setup();
    storage.set(KEY, "not-a-token").unwrap();
    block_on(holder.check_user_session());
    assert!(holder.state().is_unauthenticated());
    assert!(!storage.contains(KEY));
}

#[test]
fn token_without_exp_is_accepted() {
    let (holder, _, storage) = setup();
    storage.set(KEY, &token_with(&serde_json::json!({ "sub": "9" }))).unwrap();
    block_on(holder.check_user_session());
    assert!(holder.state().is_authenticated());
}

#[test]
fn me_failure_clears_token_and_unauthenticates() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    *api.me_result.borrow_mut() = Err(AuthError::Http { status: 401, message: "Unauthorized".to_owned() });

    block_on(holder.check_user_session());

    assert!(holder.state().is_unauthenticated());
    assert!(!storage.contains(KEY));
    assert_eq!(holder.client().authorization(), None);
}

#[test]
fn concurrent_checks_issue_one_me_request() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();

    let first = holder.clone();
    let second = holder.clone();
    block_on(async {
        futures::join!(first.check_user_session(), second.check_user_session());
    });

    assert_eq!(api.me_calls.get(), 1);
    assert!(holder.state().is_authenticated());
    assert!(!holder.is_checking());
}

#[test]
fn sequential_checks_each_request() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());
    block_on(holder.check_user_session());
    assert_eq!(api.me_calls.get(), 2);
}

#[test]
fn listeners_see_every_transition() {
    let (holder, _, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    holder.subscribe(move |state| sink.borrow_mut().push(state.status()));

    block_on(holder.check_user_session());
    block_on(holder.sign_out());

    use crate::state::auth::AuthStatus;
    assert_eq!(*seen.borrow(), vec![AuthStatus::Authenticated, AuthStatus::Unauthenticated]);
}

// =============================================================
// update_user
// =============================================================

#[test]
fn update_user_shallow_merges_when_authenticated() {
    let (holder, _, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());

    holder.update_user(UserRecord::new().with("firstName", "Beatriz").with("creci", "12345-PE"));

    let user = holder.state().user.unwrap();
    assert_eq!(user.get_str("firstName"), Some("Beatriz"));
    assert_eq!(user.get_str("creci"), Some("12345-PE"));
    assert_eq!(user.get_str("email"), Some("ana@imob.test"));
}

#[test]
fn update_user_is_noop_when_signed_out() {
    let (holder, _, _) = setup();
    block_on(holder.check_user_session());
    holder.update_user(UserRecord::new().with("firstName", "X"));
    assert!(holder.state().user.is_none());
}

// =============================================================
// Sign-in / sign-out
// =============================================================

#[test]
fn sign_in_stores_token_and_loads_user() {
    let (holder, api, storage) = setup();
    let token = fresh_token();
    *api.sign_in_result.borrow_mut() = Ok(AuthPayload { token: token.clone(), user: UserRecord::new() });

    block_on(holder.sign_in("ana@imob.test", "segredo123")).unwrap();

    assert_eq!(storage.get(KEY), Ok(Some(token)));
    assert!(holder.state().is_authenticated());
}

#[test]
fn sign_in_surfaces_server_message() {
    let (holder, api, storage) = setup();
    *api.sign_in_result.borrow_mut() = Err(AuthError::from_response(401, r#"{"message":"Credenciais inválidas"}"#));

    let err = block_on(holder.sign_in("ana@imob.test", "errada")).unwrap_err();

    assert_eq!(err.to_string(), "Credenciais inválidas");
    assert!(!storage.contains(KEY));
}

#[test]
fn sign_in_with_expired_token_reports_not_authenticated() {
    let (holder, api, _) = setup();
    *api.sign_in_result.borrow_mut() = Ok(AuthPayload { token: expired_token(), user: UserRecord::new() });
    assert_eq!(block_on(holder.sign_in("a@b.c", "p")), Err(AuthError::NotAuthenticated));
}

#[test]
fn sign_out_clears_session_even_when_logout_fails() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());
    *api.logout_result.borrow_mut() = Err(AuthError::Network("offline".to_owned()));

    block_on(holder.sign_out());

    assert_eq!(api.logout_calls.get(), 1);
    assert!(holder.state().is_unauthenticated());
    assert!(!storage.contains(KEY));
    assert_eq!(holder.client().authorization(), None);
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn refresh_success_replaces_token_and_restamps_user() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());
    let renewed = token_with(&serde_json::json!({ "exp": crate::util::time::now_secs() + 7200, "iat": 5 }));
    *api.refresh_result.borrow_mut() = Ok(renewed.clone());

    assert!(block_on(holder.refresh_session()));

    assert_eq!(storage.get(KEY), Ok(Some(renewed.clone())));
    assert_eq!(holder.client().authorization(), Some(format!("Bearer {renewed}")));
    let user = holder.state().user.unwrap();
    assert_eq!(user.access_token(), Some(renewed.as_str()));
    assert_eq!(user.get("iat").and_then(serde_json::Value::as_i64), Some(5));
}

#[test]
fn refresh_failure_ends_session_without_raising() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());
    *api.refresh_result.borrow_mut() = Err(AuthError::Http { status: 401, message: "expired".to_owned() });

    assert!(!block_on(holder.refresh_session()));

    assert!(holder.state().is_unauthenticated());
    assert!(!storage.contains(KEY));
}

#[test]
fn refresh_rejects_unusable_token() {
    let (holder, api, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());
    *api.refresh_result.borrow_mut() = Ok("garbage".to_owned());

    assert!(!block_on(holder.refresh_session()));
    assert!(holder.state().is_unauthenticated());
}

// =============================================================
// Auxiliary flows
// =============================================================

#[test]
fn verify_email_marks_user_verified() {
    let (holder, _, storage) = setup();
    storage.set(KEY, &fresh_token()).unwrap();
    block_on(holder.check_user_session());
    assert!(!holder.state().user.unwrap().email_verified());

    block_on(holder.verify_email("verify-token")).unwrap();

    assert!(holder.state().user.unwrap().email_verified());
}

#[test]
fn verify_email_failure_propagates() {
    let (holder, api, _) = setup();
    *api.verify_result.borrow_mut() = Err(AuthError::from_response(400, r#"{"message":"Link expirado"}"#));
    let err = block_on(holder.verify_email("old")).unwrap_err();
    assert_eq!(err.to_string(), "Link expirado");
}

#[test]
fn check_email_passes_through() {
    let (holder, _, _) = setup();
    assert_eq!(block_on(holder.check_email("ana@imob.test")), Ok(true));
    assert_eq!(block_on(holder.check_email("novo@imob.test")), Ok(false));
}
