//! Periodic removal of token state that can no longer affect verification
//!
//! For the opaque strategy this deletes expired active tokens. Revocation
//! entries of the signed strategy are kept, so a sweep is a no-op there.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tl_shared::config::TokenConfig;

use crate::errors::DomainError;

use super::manager::TokenManager;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            enabled: false,
        }
    }
}

impl From<&TokenConfig> for TokenCleanupConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            enabled: config.cleanup_enabled,
        }
    }
}

/// Runs `TokenManager::cleanup_expired` on a fixed interval
pub struct TokenCleanupService {
    manager: Arc<dyn TokenManager>,
    config: TokenCleanupConfig,
}

impl TokenCleanupService {
    pub fn new(manager: Arc<dyn TokenManager>, config: TokenCleanupConfig) -> Self {
        Self { manager, config }
    }

    pub fn config(&self) -> &TokenCleanupConfig {
        &self.config
    }

    /// Run a single cleanup cycle
    ///
    /// Store failures are collected into the result rather than returned.
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    /// * `Err(DomainError)` - Reserved for failures outside the store
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        let mut result = CleanupResult::default();

        match self.manager.cleanup_expired().await {
            Ok(count) => {
                result.expired_entries_removed = count;
                if count > 0 {
                    info!(
                        strategy = %self.manager.strategy(),
                        removed = count,
                        "Removed expired token entries"
                    );
                } else {
                    debug!("Token cleanup found nothing to remove");
                }
            }
            Err(e) => {
                error!("Failed to cleanup expired tokens: {}", e);
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled or the interval is zero.
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }
        if self.config.interval_seconds == 0 {
            warn!("Token cleanup interval is zero, not starting cleanup");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);
            // The first tick completes immediately
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) if !result.is_success() => {
                        warn!("Cleanup completed with errors: {:?}", result.errors);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Token cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired entries removed from the strategy's store
    pub expired_entries_removed: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
