use dux::api::user_from_value;
use dux::models::Role;
use serde_json::json;

#[test]
fn test_parse_full_record() {
    let value = json!({
        "id": "42",
        "username": "alice",
        "firstName": "Alice",
        "lastName": "Anderson",
        "email": "alice@example.com",
        "profileImage": "https://cdn.example.com/alice.png",
        "role": "editor"
    });
    let rec = user_from_value(&value).unwrap();
    assert_eq!(rec.id, "42");
    assert_eq!(rec.username, "alice");
    assert_eq!(rec.full_name(), "Alice Anderson");
    assert_eq!(rec.email.as_deref(), Some("alice@example.com"));
    assert_eq!(rec.role(), Role::Editor);
}

#[test]
fn test_numeric_id_is_accepted() {
    let value = json!({ "id": 7, "username": "bob", "role": "admin" });
    let rec = user_from_value(&value).unwrap();
    assert_eq!(rec.id, "7");
}

#[test]
fn test_missing_optional_fields_are_tolerated() {
    let value = json!({ "id": "1", "username": "bob" });
    let rec = user_from_value(&value).unwrap();
    assert!(rec.first_name.is_none());
    assert!(rec.email.is_none());
    // Missing role presents as user.
    assert_eq!(rec.role(), Role::User);
    // Display falls back to the username.
    assert_eq!(rec.display_name(), "bob");
}

#[test]
fn test_snake_case_keys_are_accepted() {
    let value = json!({
        "id": "1",
        "username": "carol",
        "first_name": "Carol",
        "last_name": "Chen"
    });
    let rec = user_from_value(&value).unwrap();
    assert_eq!(rec.full_name(), "Carol Chen");
}

#[test]
fn test_records_without_identity_are_skipped() {
    assert!(user_from_value(&json!({ "username": "no-id" })).is_none());
    assert!(user_from_value(&json!({ "id": "1" })).is_none());
    assert!(user_from_value(&json!({ "id": "", "username": "x" })).is_none());
    assert!(user_from_value(&json!("not-an-object")).is_none());
}

#[test]
fn test_unknown_role_is_preserved_verbatim() {
    let value = json!({ "id": "1", "username": "dave", "role": "superadmin" });
    let rec = user_from_value(&value).unwrap();
    assert_eq!(rec.role, "superadmin");
    assert_eq!(rec.role(), Role::User);
}
