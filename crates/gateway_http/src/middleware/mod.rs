//! HTTP middleware components

pub mod auth;
pub mod validation;

pub use auth::{SessionAuth, SessionAuthLayer};
pub use validation::{ValidatedJson, ValidationError};
