//! Domain entities representing issued tokens and their subjects.

pub mod subject;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use subject::Subject;
pub use token::{
    ActiveToken, Claims, IssuedToken, RevokeOutcome, VerifiedToken, DEFAULT_TTL_SECONDS,
};
