//! Channel names.
//!
//! A channel name is a non-empty string drawn from `[-a-zA-Z0-9_=@,.;]`.
//! The `private-` and `presence-` prefixes select channels that require a
//! signed subscription.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Maximum number of channels a single event can be triggered on.
pub const MAX_TRIGGER_CHANNELS: usize = 100;

/// Prefix of private channels.
pub const PRIVATE_PREFIX: &str = "private-";

/// Prefix of presence channels.
pub const PRESENCE_PREFIX: &str = "presence-";

/// Check a single character against the channel name alphabet.
#[must_use]
pub fn is_channel_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '@' | ',' | '.' | ';')
}

/// Check whether `name` is a syntactically valid channel name.
#[must_use]
pub fn is_valid_channel_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_channel_char)
}

/// Channel kind, derived from the name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Public,
    Private,
    Presence,
}

impl ChannelKind {
    /// Classify a channel name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name.starts_with(PRESENCE_PREFIX) {
            ChannelKind::Presence
        } else if name.starts_with(PRIVATE_PREFIX) {
            ChannelKind::Private
        } else {
            ChannelKind::Public
        }
    }

    /// Whether subscribing requires an auth token.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(self, ChannelKind::Public)
    }
}

/// A validated channel name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelName(String);

impl ChannelName {
    /// Validate and wrap a channel name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidChannelName`] if the name is empty or
    /// contains characters outside the channel alphabet.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if is_valid_channel_name(&name) {
            Ok(Self(name))
        } else {
            Err(ValidationError::InvalidChannelName(name))
        }
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the channel kind.
    #[must_use]
    pub fn kind(&self) -> ChannelKind {
        ChannelKind::of(&self.0)
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChannelName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChannelName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelName> for String {
    fn from(name: ChannelName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_alphabet() {
        assert!(is_valid_channel_name("presence-abc"));
        assert!(is_valid_channel_name("private-chat.1"));
        assert!(is_valid_channel_name("a-Z_0=9@x,y.z;"));

        assert!(!is_valid_channel_name(""));
        assert!(!is_valid_channel_name("bad channel!"));
        assert!(!is_valid_channel_name("colon:name"));
        assert!(!is_valid_channel_name("ümlaut"));
    }

    #[test]
    fn test_channel_kind() {
        assert_eq!(ChannelKind::of("presence-room"), ChannelKind::Presence);
        assert_eq!(ChannelKind::of("private-room"), ChannelKind::Private);
        assert_eq!(ChannelKind::of("room"), ChannelKind::Public);
        assert!(!ChannelKind::Public.requires_auth());
        assert!(ChannelKind::Presence.requires_auth());
    }

    #[test]
    fn test_channel_name_parse() {
        let name: ChannelName = "private-chat".parse().unwrap();
        assert_eq!(name.as_str(), "private-chat");
        assert_eq!(name.kind(), ChannelKind::Private);

        match "bad channel!".parse::<ChannelName>() {
            Err(ValidationError::InvalidChannelName(name)) => assert_eq!(name, "bad channel!"),
            other => panic!("Expected InvalidChannelName, got {:?}", other),
        }
    }

    #[test]
    fn test_channel_name_serde() {
        let name: ChannelName = serde_json::from_str(r#""ch1""#).unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""ch1""#);
        assert!(serde_json::from_str::<ChannelName>(r#""no spaces""#).is_err());
    }
}
