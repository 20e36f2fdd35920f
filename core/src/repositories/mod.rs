pub mod token;

pub use token::{
    ActiveTokenStore, InMemoryActiveTokenStore, InMemoryRevokedTokenStore, RevokedTokenStore,
};
