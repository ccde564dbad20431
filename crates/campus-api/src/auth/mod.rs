//! API-side session checks.
//!
//! The session guard in front of the admin site only checks that a cookie is
//! present. The API endpoints go further and verify the token as an HS256 JWT.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::SessionVerifier;
pub use middleware::{require_session, session_token, AuthState};
pub use models::{SessionClaims, SessionContext};
