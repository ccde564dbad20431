use crate::auth::models::SessionClaims;
use campus_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

/// Verifies HS256 session tokens against the shared secret.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate and decode a session token
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Session has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        AppError::Unauthorized("Session is not yet valid".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::Unauthorized("Invalid session signature".to_string())
                    }
                    _ => AppError::Unauthorized("Invalid session token".to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-session-secret-at-least-32-characters";

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn token(secret: &str, exp: i64) -> String {
        let claims = SessionClaims {
            sub: "user-1".to_string(),
            exp,
            iat: Some(now()),
            role: Some("admin".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let verifier = SessionVerifier::new(SECRET);
        let claims = verifier.verify(&token(SECRET, now() + 600)).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_expired_token() {
        let verifier = SessionVerifier::new(SECRET);
        let err = verifier.verify(&token(SECRET, now() - 600)).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Session has expired");
    }

    #[test]
    fn test_wrong_secret_and_garbage() {
        let verifier = SessionVerifier::new(SECRET);
        let other = "another-secret-that-is-also-32-chars-long";
        assert!(verifier.verify(&token(other, now() + 600)).is_err());
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}
