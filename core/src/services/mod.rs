//! Business services containing the token lifecycle logic.

pub mod token;

// Re-export commonly used types
pub use token::{
    build_token_manager, Clock, ManualClock, OpaqueTokenManager, SignedTokenManager, SystemClock,
    TokenCleanupConfig, TokenCleanupService, TokenManager, TokenServiceConfig,
};
