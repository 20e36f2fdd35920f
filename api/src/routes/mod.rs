//! HTTP route handlers

pub mod token;
