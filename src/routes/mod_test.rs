use super::*;
use crate::state::test_helpers;

// Router construction panics on malformed route patterns, so building the
// full app is a real test even without a live database behind the pool.
// Needs a runtime: the lazy pool spawns its maintenance tasks on creation.
#[tokio::test]
async fn app_router_builds() {
    let state = test_helpers::test_app_state();
    let _router = app(state);
}

#[test]
fn upload_body_limit_leaves_headroom_over_blob_cap() {
    assert!(UPLOAD_BODY_LIMIT > MAX_UPLOAD_BYTES);
    assert_eq!(UPLOAD_BODY_LIMIT - MAX_UPLOAD_BYTES, 64 * 1024);
}
