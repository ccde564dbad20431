//! Hooks the embedding application implements.

/// Called whenever the API rejects the session with HTTP 401.
///
/// A UI typically clears its local session and sends the user to sign-in;
/// the CLI prints a hint. The failed request's error is still returned.
pub trait SessionExpiredHandler: Send + Sync {
    fn on_session_expired(&self);
}

/// Handler that does nothing
pub struct NoOpSessionExpiredHandler;

impl SessionExpiredHandler for NoOpSessionExpiredHandler {
    fn on_session_expired(&self) {}
}
