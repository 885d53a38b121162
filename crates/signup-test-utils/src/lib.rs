//! # Signup Test Utilities
//!
//! Shared test utilities for the signup service.
//!
//! This crate provides:
//! - Fixed admin key and shared secret fixtures
//! - Server test harness (`TestSignupServer` for E2E tests)
//! - Custom assertions for admin tokens (`AdminTokenAssertions`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signup_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let ghost = wiremock::MockServer::start().await;
//!     let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;
//!
//!     let response = reqwest::Client::new()
//!         .post(server.url())
//!         .header("Authorization", bearer(TEST_SHARED_SECRET))
//!         .json(&serde_json::json!({"email": "a@b.com"}))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod server_harness;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use server_harness::*;
