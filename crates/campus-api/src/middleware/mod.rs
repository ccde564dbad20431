pub mod error_details;
pub mod session_guard;

pub use error_details::expose_error_details;
pub use session_guard::{session_guard, GuardState};
