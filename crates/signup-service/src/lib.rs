//! Signup Service Library
//!
//! Bridges a newsletter signup webhook to the Ghost Admin API:
//!
//! - Authenticates the caller with a shared bearer secret
//! - Mints a short-lived HS256 admin token from the configured admin key
//! - Creates the member upstream with the `Builder` label
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/signup.rs -> services/ghost_client.rs
//!                                        |
//!                                        +-> auth, crypto
//! ```
//!
//! # Modules
//!
//! - `auth` - Header lookup and bearer authentication
//! - `config` - Service configuration from environment
//! - `crypto` - Admin token issuance and verification
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `models` - Response descriptor and upstream payloads
//! - `observability` - Prometheus metrics
//! - `routes` - Axum router setup
//! - `services` - Signup orchestration and the upstream client

pub mod auth;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
