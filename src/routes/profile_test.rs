use super::*;
use uuid::Uuid;

#[test]
fn profile_error_mapping() {
    assert_eq!(
        profile_error_to_status(&ProfileError::NotFound(Uuid::nil())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        profile_error_to_status(&ProfileError::InvalidUsername),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        profile_error_to_status(&ProfileError::UsernameTaken),
        StatusCode::CONFLICT
    );
}

#[test]
fn error_body_names_the_failure() {
    let (status, Json(body)) = error_body(&ProfileError::UsernameTaken);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "username taken");
}

#[test]
fn availability_body_shape() {
    let body = serde_json::json!({ "availability": Availability::Taken });
    assert_eq!(body["availability"], "taken");
}
