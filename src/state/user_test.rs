use super::*;

fn claims(exp: Option<i64>, iat: Option<i64>) -> TokenClaims {
    TokenClaims { exp, iat, claims: Map::new(), valid: true }
}

#[test]
fn merge_is_shallow() {
    let mut user = UserRecord::new()
        .with("firstName", "Ana")
        .with("address", serde_json::json!({ "city": "Recife", "uf": "PE" }));
    user.merge(UserRecord::new().with("address", serde_json::json!({ "city": "Olinda" })).with("phone", "81"));
    assert_eq!(user.get_str("firstName"), Some("Ana"));
    assert_eq!(user.get("address"), Some(&serde_json::json!({ "city": "Olinda" })));
    assert_eq!(user.get_str("phone"), Some("81"));
}

#[test]
fn decorate_adds_token_claims_and_display_fields() {
    let mut user = UserRecord::new()
        .with("firstName", "Ana")
        .with("lastName", "Souza")
        .with("phone", "+55 81 99999-0000")
        .with("avatarUrl", "https://cdn.test/a.png");
    user.decorate("tok", Some(&claims(Some(200), Some(100))));
    assert_eq!(user.access_token(), Some("tok"));
    assert_eq!(user.get("exp"), Some(&Value::from(200)));
    assert_eq!(user.get("iat"), Some(&Value::from(100)));
    assert_eq!(user.display_name(), Some("Ana Souza"));
    assert_eq!(user.get_str("phoneNumber"), Some("+55 81 99999-0000"));
    assert_eq!(user.get_str("photoURL"), Some("https://cdn.test/a.png"));
}

#[test]
fn display_name_falls_back_to_name_then_email() {
    let mut named = UserRecord::new().with("name", "Corretor Um");
    named.decorate("t", None);
    assert_eq!(named.display_name(), Some("Corretor Um"));

    let mut email_only = UserRecord::new().with("email", "c@imob.test");
    email_only.decorate("t", None);
    assert_eq!(email_only.display_name(), Some("c@imob.test"));

    let mut first_only = UserRecord::new().with("firstName", "Bia");
    first_only.decorate("t", None);
    assert_eq!(first_only.display_name(), Some("Bia"));
}

#[test]
fn roles_reads_role_and_roles_list() {
    let user = UserRecord::new()
        .with("role", "agent")
        .with("roles", serde_json::json!(["manager", 7]));
    assert_eq!(user.roles(), vec!["agent".to_owned(), "manager".to_owned()]);
}

#[test]
fn has_any_role_with_empty_allow_list_admits_everyone() {
    assert!(UserRecord::new().has_any_role(&[]));
}

#[test]
fn has_any_role_checks_membership() {
    let agent = UserRecord::new().with("role", "agent");
    assert!(!agent.has_any_role(&["admin".to_owned()]));
    assert!(agent.has_any_role(&["admin".to_owned(), "agent".to_owned()]));
}

#[test]
fn email_verified_flag_or_timestamp() {
    assert!(!UserRecord::new().email_verified());
    assert!(UserRecord::new().with("emailVerified", true).email_verified());
    assert!(!UserRecord::new().with("emailVerified", false).email_verified());
    assert!(UserRecord::new().with("emailVerifiedAt", "2026-01-01T00:00:00Z").email_verified());
    assert!(!UserRecord::new().with("emailVerifiedAt", Value::Null).email_verified());
}

#[test]
fn deserializes_from_plain_object() {
    let user: UserRecord = serde_json::from_str(r#"{"id":1,"email":"a@b.c"}"#).unwrap();
    assert_eq!(user.email(), Some("a@b.c"));
}
