//! Upload broker API.
//!
//! Issues presigned object-storage URLs to signed-in users and serves the
//! admin site behind the session guard. `main.rs` wires [`setup`] to a
//! listener; tests build the router directly with [`setup::routes::setup_routes`].

pub mod api_doc;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
