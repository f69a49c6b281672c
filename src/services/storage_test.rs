use super::*;

fn scratch_storage() -> Storage {
    let root = std::env::temp_dir().join(format!("bentoboard-test-{}", Uuid::new_v4()));
    Storage::new(root, "http://localhost:3000")
}

// =============================================================================
// validate_upload
// =============================================================================

#[test]
fn validate_accepts_allow_listed_types() {
    assert_eq!(validate_upload("image/jpeg", 10).unwrap(), "jpg");
    assert_eq!(validate_upload("image/png", 10).unwrap(), "png");
    assert_eq!(validate_upload("image/webp", 10).unwrap(), "webp");
    assert_eq!(validate_upload("image/gif", 10).unwrap(), "gif");
}

#[test]
fn validate_rejects_disallowed_types() {
    assert!(matches!(
        validate_upload("image/svg+xml", 10),
        Err(StorageError::UnsupportedType(_))
    ));
    assert!(matches!(
        validate_upload("application/pdf", 10),
        Err(StorageError::UnsupportedType(_))
    ));
    assert!(matches!(validate_upload("", 10), Err(StorageError::UnsupportedType(_))));
}

#[test]
fn validate_rejects_oversized() {
    let result = validate_upload("image/png", MAX_UPLOAD_BYTES + 1);
    assert!(matches!(result, Err(StorageError::TooLarge { size }) if size == MAX_UPLOAD_BYTES + 1));
}

#[test]
fn validate_accepts_exactly_at_cap() {
    assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
}

#[tokio::test]
async fn oversized_upload_never_reaches_disk() {
    let storage = scratch_storage();
    let bytes = vec![0_u8; MAX_UPLOAD_BYTES + 1];
    let result = storage.store(Uuid::new_v4(), "image/png", &bytes).await;
    assert!(matches!(result, Err(StorageError::TooLarge { .. })));
    // Root was never created: validation ran before any IO.
    assert!(!storage.root().exists());
}

#[tokio::test]
async fn disallowed_type_never_reaches_disk() {
    let storage = scratch_storage();
    let result = storage.store(Uuid::new_v4(), "text/html", b"<html>").await;
    assert!(matches!(result, Err(StorageError::UnsupportedType(_))));
    assert!(!storage.root().exists());
}

// =============================================================================
// key / URL mapping
// =============================================================================

#[test]
fn key_for_is_scoped_and_unique() {
    let user = Uuid::new_v4();
    let a = Storage::key_for(user, "png");
    let b = Storage::key_for(user, "png");
    assert!(a.starts_with(&format!("{user}/")));
    assert!(a.ends_with(".png"));
    assert_ne!(a, b);
}

#[test]
fn public_url_round_trips_through_key_from_url() {
    let storage = scratch_storage();
    let key = Storage::key_for(Uuid::new_v4(), "webp");
    let url = storage.public_url(&key);
    assert_eq!(storage.key_from_url(&url), Some(key));
}

#[test]
fn key_from_url_rejects_foreign_base() {
    let storage = scratch_storage();
    assert_eq!(storage.key_from_url("https://elsewhere.example/uploads/a/b.png"), None);
    assert_eq!(storage.key_from_url("not-a-url"), None);
}

#[test]
fn key_from_url_rejects_traversal() {
    let storage = scratch_storage();
    let url = format!("{}/uploads/../secrets.txt", "http://localhost:3000");
    assert_eq!(storage.key_from_url(&url), None);
    let url = "http://localhost:3000/uploads/user/../../etc/passwd";
    assert_eq!(storage.key_from_url(url), None);
}

#[test]
fn key_from_url_rejects_empty_key() {
    let storage = scratch_storage();
    assert_eq!(storage.key_from_url("http://localhost:3000/uploads/"), None);
}

#[test]
fn public_base_trailing_slash_is_normalized() {
    let storage = Storage::new(PathBuf::from("/tmp/x"), "http://localhost:3000/");
    assert_eq!(storage.public_url("u/k.png"), "http://localhost:3000/uploads/u/k.png");
}

// =============================================================================
// store / delete round trip
// =============================================================================

#[tokio::test]
async fn store_then_delete_round_trip() {
    let storage = scratch_storage();
    let user = Uuid::new_v4();

    let url = storage.store(user, "image/png", b"png-bytes").await.unwrap();
    assert!(url.starts_with("http://localhost:3000/uploads/"));

    let key = storage.key_from_url(&url).unwrap();
    assert_eq!(tokio::fs::read(storage.root().join(&key)).await.unwrap(), b"png-bytes");

    assert!(storage.delete_by_url(user, &url).await.unwrap());
    // Second delete reports nothing removed.
    assert!(!storage.delete_by_url(user, &url).await.unwrap());

    let _ = tokio::fs::remove_dir_all(storage.root()).await;
}

#[tokio::test]
async fn delete_foreign_url_is_refused() {
    let storage = scratch_storage();
    let result = storage
        .delete_by_url(Uuid::new_v4(), "https://elsewhere.example/uploads/a.png")
        .await;
    assert!(matches!(result, Err(StorageError::ForeignUrl(_))));
}

#[tokio::test]
async fn delete_refuses_another_owners_blob() {
    let storage = scratch_storage();
    let victim = Uuid::new_v4();
    let caller = Uuid::new_v4();

    // Blob URLs are public (they appear on rendered pages), so knowing one
    // must not grant deletion.
    let url = storage.store(victim, "image/png", b"victim-bytes").await.unwrap();
    let result = storage.delete_by_url(caller, &url).await;
    assert!(matches!(result, Err(StorageError::ForeignUrl(_))));

    // The victim's blob is untouched and the victim can still remove it.
    let key = storage.key_from_url(&url).unwrap();
    assert!(storage.root().join(&key).exists());
    assert!(storage.delete_by_url(victim, &url).await.unwrap());

    let _ = tokio::fs::remove_dir_all(storage.root()).await;
}
