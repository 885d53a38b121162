//! Secret types for keeping credentials out of logs.
//!
//! Re-exports the [`secrecy`] types used throughout the signup bridge. Every
//! value that would let someone impersonate the service goes through one of
//! these wrappers:
//!
//! - the webhook shared secret (`SHARED_SECRET`)
//! - the Admin API key material (`GHOST_ADMIN_KEY`) and its decoded bytes
//! - every minted admin token
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so a
//! struct that derives `Debug` over them can be logged safely. The inner value
//! is zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct WebhookAuth {
//!     header_name: String,
//!     shared_secret: SecretString,
//! }
//!
//! let auth = WebhookAuth {
//!     header_name: "authorization".to_string(),
//!     shared_secret: SecretString::from("s3cret"),
//! };
//!
//! // Redacted
//! println!("{:?}", auth);
//!
//! // Explicit access only
//! let raw: &str = auth.shared_secret.expose_secret();
//! assert_eq!(raw, "s3cret");
//! ```
//!
//! Binary key material uses `SecretBox<Vec<u8>>`:
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretBox};
//!
//! let key = SecretBox::new(Box::new(vec![0xde, 0xad, 0xbe, 0xef]));
//! assert_eq!(key.expose_secret().len(), 4);
//! assert!(format!("{key:?}").contains("REDACTED"));
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
