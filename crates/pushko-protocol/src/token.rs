//! Subscription auth tokens.
//!
//! A client subscribing to a private or presence channel sends its socket id
//! to the application backend, which answers with an [`AuthToken`]:
//!
//! ```text
//! {"auth": "<key>:<hex hmac>", "channel_data": "<json string>"}
//! ```
//!
//! The HMAC covers `socket_id:channel`, or `socket_id:channel:channel_data`
//! when channel data is present.

use serde::{Deserialize, Serialize};

use crate::signature::{hmac_sha256_hex, SignatureError};

/// Auth token returned to a subscribing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// `key:signature`.
    pub auth: String,
    /// JSON-encoded channel data, present for presence channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<String>,
}

impl AuthToken {
    /// The hex signature part of `auth`.
    #[must_use]
    pub fn signature(&self) -> &str {
        self.auth
            .split_once(':')
            .map(|(_, signature)| signature)
            .unwrap_or_default()
    }

    /// Encode the token as the JSON handshake response.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The string an auth token signature is computed over.
#[must_use]
pub fn socket_string_to_sign(socket_id: &str, channel: &str, channel_data: Option<&str>) -> String {
    match channel_data {
        Some(data) => format!("{}:{}:{}", socket_id, channel, data),
        None => format!("{}:{}", socket_id, channel),
    }
}

/// Sign a subscription for `socket_id` on `channel`.
///
/// Inputs are expected to be validated already.
///
/// # Errors
///
/// Returns an error if the secret is rejected as an HMAC key.
pub fn authenticate_socket(
    key: &str,
    secret: &[u8],
    socket_id: &str,
    channel: &str,
    channel_data: Option<String>,
) -> Result<AuthToken, SignatureError> {
    let message = socket_string_to_sign(socket_id, channel, channel_data.as_deref());
    let signature = hmac_sha256_hex(secret, message.as_bytes())?;

    Ok(AuthToken {
        auth: format!("{}:{}", key, signature),
        channel_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_auth_without_data() {
        let token = authenticate_socket("K", b"S", "123.456", "ch1", None).unwrap();

        assert_eq!(
            token.auth,
            "K:067ecf674f67b06ad9b54843511cdbf1ca30e875488314ad82b1bb9edcfce2ab"
        );
        assert!(token.channel_data.is_none());
        assert_eq!(
            token.to_json().unwrap(),
            r#"{"auth":"K:067ecf674f67b06ad9b54843511cdbf1ca30e875488314ad82b1bb9edcfce2ab"}"#
        );
    }

    #[test]
    fn test_socket_auth_with_data() {
        let data = r#"{"foo":"bar"}"#.to_string();
        let token = authenticate_socket("K", b"S", "123.456", "ch1", Some(data.clone())).unwrap();

        assert_eq!(
            token.signature(),
            "93beb0a4fe481dfcfa7df7a74ca20794a5f9d032888e2c813646c348f8aa7fef"
        );
        assert_eq!(token.channel_data, Some(data));

        let json: serde_json::Value = serde_json::from_str(&token.to_json().unwrap()).unwrap();
        assert_eq!(json["channel_data"], r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_socket_string_to_sign() {
        assert_eq!(socket_string_to_sign("1.2", "c", None), "1.2:c");
        assert_eq!(socket_string_to_sign("1.2", "c", Some("{}")), "1.2:c:{}");
    }

    #[test]
    fn test_token_roundtrip_from_handshake_json() {
        let token: AuthToken = serde_json::from_str(r#"{"auth":"K:abc"}"#).unwrap();
        assert_eq!(token.signature(), "abc");
        assert!(token.channel_data.is_none());
    }
}
