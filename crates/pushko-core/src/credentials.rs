//! Application credentials and endpoint settings.
//!
//! Both are immutable once built and are owned by the client for its
//! whole lifetime.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default API host.
pub const DEFAULT_HOST: &str = "http://api.pusherapp.com";

/// Default API port.
pub const DEFAULT_PORT: u16 = 80;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors raised while building credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A required credential field is missing or empty.
    #[error("{field} is not defined in {profile} configuration")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
        /// Profile the credentials were loaded from.
        profile: String,
    },

    /// No profile with this name exists.
    #[error("Unknown configuration profile: {0}")]
    UnknownProfile(String),
}

/// The application secret.
///
/// `Debug` output is redacted and the type has no serializer, so the
/// secret cannot leak through logs or encoded payloads.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw key bytes for HMAC computation.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(\"***\")")
    }
}

/// Application credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    key: String,
    secret: Secret,
}

impl Credentials {
    /// Build credentials, rejecting empty fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingField`] naming the first empty field.
    pub fn new(
        app_id: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<Secret>,
    ) -> Result<Self, ConfigurationError> {
        Self::for_profile("default", app_id, key, secret)
    }

    /// Build credentials loaded from a named profile, so errors can name it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingField`] naming the first empty field.
    pub fn for_profile(
        profile: &str,
        app_id: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<Secret>,
    ) -> Result<Self, ConfigurationError> {
        let credentials = Self {
            app_id: app_id.into(),
            key: key.into(),
            secret: secret.into(),
        };

        let missing = if credentials.app_id.is_empty() {
            Some("app_id")
        } else if credentials.key.is_empty() {
            Some("auth_key")
        } else if credentials.secret.is_empty() {
            Some("secret")
        } else {
            None
        };

        match missing {
            Some(field) => Err(ConfigurationError::MissingField {
                field,
                profile: profile.to_string(),
            }),
            None => Ok(credentials),
        }
    }

    /// Application id.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Public application key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Application secret.
    #[must_use]
    pub fn secret(&self) -> &Secret {
        &self.secret
    }
}

/// Where and how requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host, optionally with scheme (`http://` is assumed when absent).
    pub host: String,
    /// Port.
    pub port: u16,
    /// Per-request timeout. Zero means no limit.
    pub timeout: Duration,
    /// Return raw response bodies from `trigger`.
    pub debug: bool,
}

impl Endpoint {
    /// Create an endpoint with the default timeout and debug off.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
            debug: false,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable debug responses.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// `scheme://host:port` with no trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.contains("://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }

    /// Full URL for a signed `path?query`.
    #[must_use]
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url(), path_and_query)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
