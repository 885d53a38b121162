//! Common utilities and types shared across the signup bridge crates.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for compact token (JWT) parsing helpers and size limits
pub mod jwt;
