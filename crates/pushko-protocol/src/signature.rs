//! HMAC-SHA256 request signing.
//!
//! Signing merges the auth parameters into the request's own parameters,
//! canonicalizes the result, and appends `auth_signature` computed over it.

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::trace;

use crate::canonical::{canonical_query, string_to_sign, Method, QueryParams, SignableRequest};
use crate::version::AUTH_VERSION;

type HmacSha256 = Hmac<Sha256>;

/// Parameter names reserved by the auth protocol.
pub mod params {
    pub const AUTH_KEY: &str = "auth_key";
    pub const AUTH_TIMESTAMP: &str = "auth_timestamp";
    pub const AUTH_VERSION: &str = "auth_version";
    pub const AUTH_SIGNATURE: &str = "auth_signature";
    pub const BODY_MD5: &str = "body_md5";
    pub const SOCKET_ID: &str = "socket_id";
}

/// Signing errors.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The secret was rejected as an HMAC key.
    #[error("Secret cannot be used as an HMAC key")]
    InvalidKey,
}

/// Current unix time in seconds.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Hex-encoded HMAC-SHA256 of `message` under `secret`.
///
/// # Errors
///
/// Returns an error if the secret is rejected as a key.
pub fn hmac_sha256_hex(secret: &[u8], message: &[u8]) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Hex-encoded MD5 digest of a request body, sent as `body_md5`.
#[must_use]
pub fn body_md5(body: &[u8]) -> String {
    hex::encode(Md5::digest(body))
}

/// A request carrying its auth parameters and signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// All query parameters, `auth_signature` included.
    pub params: QueryParams,
}

impl SignedRequest {
    /// The hex HMAC signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        self.param(params::AUTH_SIGNATURE).unwrap_or_default()
    }

    /// The `auth_timestamp` the request was signed with.
    #[must_use]
    pub fn timestamp(&self) -> Option<u64> {
        self.param(params::AUTH_TIMESTAMP)?.parse().ok()
    }

    /// Look up a query parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Final query string, keys sorted ascending.
    #[must_use]
    pub fn query_string(&self) -> String {
        canonical_query(&self.params)
    }

    /// `path?query`, ready to be appended to a host.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", self.path, self.query_string())
    }
}

/// Sign a request.
///
/// The auth parameters are `auth_key`, `auth_timestamp` (the given timestamp,
/// or the current unix time) and `auth_version`. The request's own
/// parameters are merged over them, so a caller-supplied key wins on
/// collision.
///
/// # Errors
///
/// Returns an error if the secret is rejected as an HMAC key.
pub fn sign(
    key: &str,
    secret: &[u8],
    request: &SignableRequest,
    timestamp: Option<u64>,
) -> Result<SignedRequest, SignatureError> {
    let timestamp = timestamp.unwrap_or_else(unix_now);

    let mut merged = QueryParams::new();
    merged.insert(params::AUTH_KEY.to_string(), key.to_string());
    merged.insert(params::AUTH_TIMESTAMP.to_string(), timestamp.to_string());
    merged.insert(params::AUTH_VERSION.to_string(), AUTH_VERSION.to_string());
    merged.extend(request.params.clone());
    // A stale signature must never feed into the new one.
    merged.remove(params::AUTH_SIGNATURE);

    let canonical = string_to_sign(request.method, &request.path, &merged);
    trace!(method = %request.method, path = %request.path, timestamp, "Signing request");

    let signature = hmac_sha256_hex(secret, canonical.as_bytes())?;
    merged.insert(params::AUTH_SIGNATURE.to_string(), signature);

    Ok(SignedRequest {
        method: request.method,
        path: request.path.clone(),
        params: merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_CHANNELS_SIGNATURE: &str =
        "1aa8f99bb6b11e6e4c649dbe8b80a02eff802e91eca38590c41adc735a6132a2";

    #[test]
    fn test_golden_signature() {
        let request = SignableRequest::get("/apps/1/channels");
        let signed = sign("K", b"S", &request, Some(1_000_000_000)).unwrap();

        assert_eq!(signed.signature(), GOLDEN_CHANNELS_SIGNATURE);
        assert_eq!(
            signed.query_string(),
            format!(
                "auth_key=K&auth_signature={}&auth_timestamp=1000000000&auth_version=1.0",
                GOLDEN_CHANNELS_SIGNATURE
            )
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let request = SignableRequest::post("/apps/1/events").with_param("body_md5", "abc");

        let first = sign("K", b"S", &request, Some(1000)).unwrap();
        let second = sign("K", b"S", &request, Some(1000)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.path_and_query(), second.path_and_query());
    }

    #[test]
    fn test_timestamp_changes_signature() {
        let request = SignableRequest::get("/apps/1/channels");
        let a = sign("K", b"S", &request, Some(1000)).unwrap();
        let b = sign("K", b"S", &request, Some(1001)).unwrap();
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_wall_clock_timestamp() {
        let before = unix_now();
        let signed = sign("K", b"S", &SignableRequest::get("/x"), None).unwrap();
        let ts = signed.timestamp().unwrap();
        assert!(ts >= before && ts <= unix_now());
    }

    #[test]
    fn test_extra_params_win_on_collision() {
        let request = SignableRequest::get("/x").with_param("auth_version", "2.0");
        let signed = sign("K", b"S", &request, Some(1)).unwrap();
        assert_eq!(signed.param("auth_version"), Some("2.0"));
    }

    #[test]
    fn test_signature_excluded_from_its_own_input() {
        let clean = SignableRequest::get("/x");
        let poisoned = SignableRequest::get("/x").with_param("auth_signature", "bogus");

        let a = sign("K", b"S", &clean, Some(1)).unwrap();
        let b = sign("K", b"S", &poisoned, Some(1)).unwrap();
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_secret_changes_signature() {
        let request = SignableRequest::get("/x");
        let a = sign("K", b"S", &request, Some(1)).unwrap();
        let b = sign("K", b"T", &request, Some(1)).unwrap();
        assert_ne!(a.signature(), b.signature());
        assert!(!a.params.values().any(|v| v == "S"));
    }

    #[test]
    fn test_body_md5() {
        assert_eq!(body_md5(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }
}
