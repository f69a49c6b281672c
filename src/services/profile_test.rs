use super::*;

// =============================================================================
// normalize_username
// =============================================================================

#[test]
fn normalize_username_lowercases() {
    assert_eq!(normalize_username("JohnDoe"), Some("johndoe".into()));
}

#[test]
fn normalize_username_allows_digits_and_underscore() {
    assert_eq!(normalize_username("john_doe_99"), Some("john_doe_99".into()));
}

#[test]
fn normalize_username_trims_whitespace() {
    assert_eq!(normalize_username("  jane "), Some("jane".into()));
}

#[test]
fn normalize_username_rejects_empty() {
    assert_eq!(normalize_username(""), None);
    assert_eq!(normalize_username("   "), None);
}

#[test]
fn normalize_username_rejects_symbols() {
    assert_eq!(normalize_username("john.doe"), None);
    assert_eq!(normalize_username("john doe"), None);
    assert_eq!(normalize_username("john-doe"), None);
    assert_eq!(normalize_username("jöhn"), None);
}

#[test]
fn normalize_username_rejects_overlong() {
    let long = "a".repeat(MAX_USERNAME_LEN + 1);
    assert_eq!(normalize_username(&long), None);
    let max = "a".repeat(MAX_USERNAME_LEN);
    assert_eq!(normalize_username(&max), Some(max.clone()));
}

// =============================================================================
// Availability
// =============================================================================

#[test]
fn availability_serializes_snake_case() {
    assert_eq!(serde_json::to_value(Availability::Available).unwrap(), "available");
    assert_eq!(serde_json::to_value(Availability::Taken).unwrap(), "taken");
}

// =============================================================================
// live DB tests
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::super::*;
    use crate::services::auth;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        crate::db::init_pool(&url).await.expect("pool init")
    }

    fn unique_email(tag: &str) -> String {
        format!("{tag}-{}@example.com", Uuid::new_v4().simple())
    }

    #[tokio::test]
    async fn own_username_is_always_available() {
        let pool = test_pool().await;
        let user_id = auth::register_user(&pool, &unique_email("own"), "password123").await.unwrap();
        let username = format!("u{}", Uuid::new_v4().simple());
        update_profile(&pool, user_id, ProfileUpdate { username: Some(username.clone()), ..Default::default() })
            .await
            .unwrap();

        let result = username_availability(&pool, user_id, &username, Some(&username)).await.unwrap();
        assert_eq!(result, Availability::Available);
    }

    #[tokio::test]
    async fn taken_username_blocks_update() {
        let pool = test_pool().await;
        let first = auth::register_user(&pool, &unique_email("first"), "password123").await.unwrap();
        let second = auth::register_user(&pool, &unique_email("second"), "password123").await.unwrap();

        let username = format!("u{}", Uuid::new_v4().simple());
        update_profile(&pool, first, ProfileUpdate { username: Some(username.clone()), ..Default::default() })
            .await
            .unwrap();

        let availability = username_availability(&pool, second, &username, None).await.unwrap();
        assert_eq!(availability, Availability::Taken);

        let result = update_profile(
            &pool,
            second,
            ProfileUpdate { username: Some(username), ..Default::default() },
        )
        .await;
        assert!(matches!(result, Err(ProfileError::UsernameTaken)));
    }
}
