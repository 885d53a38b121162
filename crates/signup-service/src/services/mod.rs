//! Service layer for the signup service.
//!
//! # Components
//!
//! - `ghost_client` - HTTP client for the upstream member-creation endpoint
//! - `signup` - Request orchestration from method check to acknowledgement

pub mod ghost_client;
pub mod signup;

pub use ghost_client::{build_http_client, GhostClient, MemberOutcome, UpstreamError};
pub use signup::{handle_signup, SignupBody, SignupRequest};
