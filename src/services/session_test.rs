use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser
// =============================================================================

#[test]
fn session_user_serializes_null_username_before_onboarding() {
    let user = SessionUser {
        id: Uuid::nil(),
        email: "alice@example.com".into(),
        username: None,
        display_name: None,
        avatar_url: None,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["email"], "alice@example.com");
    assert!(json["username"].is_null());
}

#[test]
fn session_user_serialize_round_trip_fields() {
    let user = SessionUser {
        id: Uuid::nil(),
        email: "bob@example.com".into(),
        username: Some("bob".into()),
        display_name: Some("Bob".into()),
        avatar_url: Some("https://example.com/a.png".into()),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["username"], "bob");
    assert_eq!(json["display_name"], "Bob");
    assert_eq!(json["avatar_url"], "https://example.com/a.png");
}
