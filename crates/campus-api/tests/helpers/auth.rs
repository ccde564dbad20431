use campus_api::auth::SessionClaims;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

/// Secret shared by `test_config` and the tokens minted here.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

pub const TEST_USER_ID: &str = "user-42";

fn mint(secret: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: TEST_USER_ID.to_string(),
        exp: (now + expires_in).timestamp(),
        iat: Some(now.timestamp()),
        role: Some("admin".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn valid_token() -> String {
    mint(TEST_JWT_SECRET, Duration::hours(1))
}

pub fn expired_token() -> String {
    mint(TEST_JWT_SECRET, Duration::hours(-1))
}

pub fn foreign_token() -> String {
    mint("some-other-secret-that-is-also-32-chars-long", Duration::hours(1))
}

pub fn session_cookie(token: &str) -> String {
    format!("access_token={}", token)
}
