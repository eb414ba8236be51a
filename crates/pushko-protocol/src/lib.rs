//! # pushko-protocol
//!
//! Request signing for the Pushko push-messaging client.
//!
//! This crate holds the security-critical part of the client: turning a
//! request into its canonical string-to-sign, computing the HMAC-SHA256
//! signature with the application secret, and producing either a signed
//! query string (REST calls) or an auth token (subscription handshakes).
//! It performs no I/O.
//!
//! ## Example
//!
//! ```rust
//! use pushko_protocol::{sign, SignableRequest};
//!
//! let request = SignableRequest::get("/apps/1/channels");
//! let signed = sign("key", b"secret", &request, Some(1_000_000_000)).unwrap();
//!
//! assert!(signed.query_string().starts_with("auth_key=key&auth_signature="));
//! ```

pub mod canonical;
pub mod signature;
pub mod token;
pub mod version;

pub use canonical::{canonical_query, string_to_sign, Method, QueryParams, SignableRequest};
pub use signature::{body_md5, hmac_sha256_hex, sign, unix_now, SignatureError, SignedRequest};
pub use token::{authenticate_socket, AuthToken};
pub use version::{Version, AUTH_VERSION};
