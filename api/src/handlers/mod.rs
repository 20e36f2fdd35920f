pub mod error;

pub use error::{
    handle_domain_error, issue_error, login_error, revoke_error, status_for, verify_error,
    Operation,
};
