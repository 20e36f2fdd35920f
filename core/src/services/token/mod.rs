//! Token service module
//!
//! This module handles all token lifecycle operations:
//! - Issuance of signed (HS256 JWT) and opaque (UUID) tokens
//! - Verification with ordered structure, revocation, expiry and subject checks
//! - Revocation
//! - Optional background cleanup of expired state

mod cleanup;
mod clock;
mod config;
mod manager;
mod opaque;
mod signed;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use manager::{build_token_manager, TokenManager};
pub use opaque::OpaqueTokenManager;
pub use signed::{SignedTokenManager, SIGNING_ALGORITHM};
