//! Socket ids.
//!
//! The service assigns each client connection an id of the form
//! `<digits>.<digits>`.

use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Check whether `id` has the `<digits>.<digits>` shape.
#[must_use]
pub fn is_valid_socket_id(id: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match id.split_once('.') {
        Some((left, right)) => all_digits(left) && all_digits(right),
        None => false,
    }
}

/// A validated socket id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SocketId(String);

impl SocketId {
    /// Validate and wrap a socket id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSocketId`] if the id is malformed.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if is_valid_socket_id(&id) {
            Ok(Self(id))
        } else {
            Err(ValidationError::InvalidSocketId(id))
        }
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SocketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SocketId> for String {
    fn from(id: SocketId) -> String {
        id.0
    }
}

impl FromStr for SocketId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_id_shape() {
        assert!(is_valid_socket_id("123.456"));
        assert!(is_valid_socket_id("0.0"));

        assert!(!is_valid_socket_id("abc"));
        assert!(!is_valid_socket_id("123"));
        assert!(!is_valid_socket_id("123."));
        assert!(!is_valid_socket_id(".456"));
        assert!(!is_valid_socket_id("1.2.3"));
        assert!(!is_valid_socket_id("123.456\n"));
        assert!(!is_valid_socket_id(" 123.456"));
    }

    #[test]
    fn test_socket_id_parse() {
        let id: SocketId = "123.456".parse().unwrap();
        assert_eq!(id.to_string(), "123.456");
        assert_eq!(id.as_ref(), "123.456");
        assert_eq!(String::from(id), "123.456");
        assert!(matches!(
            SocketId::new("abc"),
            Err(ValidationError::InvalidSocketId(_))
        ));
    }
}
