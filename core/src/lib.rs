//! # Tokenlab Core
//!
//! Token lifecycle domain for the Tokenlab services.
//! This crate contains the token entities, the error taxonomy, the in-memory
//! token stores and the token managers that issue, verify and revoke signed
//! (JWT) and opaque (UUID) tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
