use super::*;

#[test]
fn hash_produces_argon2id_phc_string() {
    let hash = hash_password("correct-horse-battery-staple").unwrap();
    assert!(hash.starts_with("$argon2id$"));
}

#[test]
fn correct_password_verifies() {
    let hash = hash_password("correct-horse-battery-staple").unwrap();
    assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
}

#[test]
fn wrong_password_fails_verification() {
    let hash = hash_password("real-password").unwrap();
    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn malformed_hash_is_an_error() {
    assert!(verify_password("whatever", "not-a-phc-string").is_err());
}

#[test]
fn hashes_are_salted() {
    let a = hash_password("same-password").unwrap();
    let b = hash_password("same-password").unwrap();
    assert_ne!(a, b);
}

#[test]
fn acceptable_password_enforces_minimum_length() {
    assert!(!acceptable_password("short"));
    assert!(!acceptable_password("1234567"));
    assert!(acceptable_password("12345678"));
    assert!(acceptable_password("a-perfectly-fine-password"));
}
