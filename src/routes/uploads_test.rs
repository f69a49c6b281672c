use super::*;

#[test]
fn storage_error_mapping() {
    assert_eq!(
        storage_error_to_status(&StorageError::TooLarge { size: MAX_UPLOAD_BYTES + 1 }),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        storage_error_to_status(&StorageError::UnsupportedType("text/plain".into())),
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(
        storage_error_to_status(&StorageError::ForeignUrl("https://x".into())),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn error_body_carries_message() {
    let (status, Json(body)) = error_body(StatusCode::BAD_REQUEST, "file field is required");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "file field is required");
}
