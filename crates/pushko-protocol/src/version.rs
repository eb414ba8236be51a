//! Auth protocol versioning.
//!
//! Every signed request carries an `auth_version` parameter. Only `1.0`
//! exists today.

/// Current auth protocol version, emitted as `auth_version=1.0`.
pub const AUTH_VERSION: Version = Version { major: 1, minor: 0 };

/// Auth protocol version information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    /// Major version - breaking changes increment this.
    pub major: u8,
    /// Minor version - backwards-compatible changes increment this.
    pub minor: u8,
}

impl Version {
    /// Create a new version.
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Default for Version {
    fn default() -> Self {
        AUTH_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_version_wire_form() {
        assert_eq!(AUTH_VERSION.to_string(), "1.0");
        assert_eq!(Version::default(), AUTH_VERSION);
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2);
        assert_eq!(v.to_string(), "1.2");
    }
}
