//! Token route handlers
//!
//! - `POST /generate-token` - issue a token for a subject
//! - `POST /verify-token` - check a token, optionally against a subject
//! - `POST /login` - authenticate a subject with a token (JSON or form body)
//! - `POST /revoke-token` - revoke a token
//! - `GET /` - service description

pub mod generate;
pub mod home;
pub mod login;
pub mod revoke;
pub mod verify;

use std::sync::Arc;

use tl_core::services::TokenManager;
use tl_shared::config::{ServerConfig, TokenStrategy};

/// Application state shared by the token handlers
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<dyn TokenManager>,
    /// Body size limit for JSON and form payloads, in bytes
    pub max_payload_size: usize,
}

impl AppState {
    pub fn new(manager: Arc<dyn TokenManager>) -> Self {
        Self {
            manager,
            max_payload_size: ServerConfig::default().max_payload_size,
        }
    }

    pub fn with_max_payload_size(mut self, bytes: usize) -> Self {
        self.max_payload_size = bytes;
        self
    }

    pub fn strategy(&self) -> TokenStrategy {
        self.manager.strategy()
    }
}

pub use generate::generate_token;
pub use home::home;
pub use login::login;
pub use revoke::revoke_token;
pub use verify::verify_token;
