//! Data models for the application
//!
//! Request and response types exchanged between the campus apps and the API,
//! organized by feature area.

mod account;
pub mod upload;

pub use account::*;
pub use upload::*;
