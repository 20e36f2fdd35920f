//! Tests for the token managers and the cleanup service

mod cleanup_tests;
mod mocks;
mod opaque_tests;
