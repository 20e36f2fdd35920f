//! Request and response bodies of the token endpoints

pub mod token;

pub use tl_shared::errors::ErrorResponse;
pub use token::*;
