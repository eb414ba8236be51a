//! Client configuration.
//!
//! Configuration is a set of named profiles, loaded from:
//! - A TOML configuration file
//! - Environment variables (`PUSHKO_PROFILES__<NAME>__<FIELD>`)
//!
//! ```toml
//! [profiles.default]
//! app_id = "1234"
//! auth_key = "278d425bdf160c739803"
//! secret = "7ad3773142a6692b25b8"
//! server = "http://api.pusherapp.com"
//! port = 80
//! timeout = 30
//! debug = false
//! ```

use pushko_core::credentials::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
use pushko_core::{ConfigurationError, Credentials, Endpoint, Secret};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Name of the profile used when none is given.
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PUSHKO";

/// Files searched by [`PushkoConfig::load`], in order.
pub const CONFIG_PATHS: [&str; 3] = [
    "pushko.toml",
    "/etc/pushko/pushko.toml",
    "~/.config/pushko/pushko.toml",
];

/// A single named set of credentials and connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Application id.
    #[serde(default)]
    pub app_id: String,

    /// Public application key.
    #[serde(default, alias = "key")]
    pub auth_key: String,

    /// Application secret.
    #[serde(default)]
    pub secret: Secret,

    /// API host, optionally with scheme.
    #[serde(default = "default_server", alias = "host")]
    pub server: String,

    /// API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds, `0` for no limit.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Return raw trigger responses.
    #[serde(default)]
    pub debug: bool,
}

fn default_server() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Profile {
    /// Build validated credentials from this profile.
    ///
    /// # Errors
    ///
    /// Returns an error naming the profile and the first missing field.
    pub fn credentials(&self, name: &str) -> Result<Credentials, ConfigurationError> {
        Credentials::for_profile(
            name,
            self.app_id.clone(),
            self.auth_key.clone(),
            self.secret.clone(),
        )
    }

    /// Endpoint settings of this profile.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.server.clone(), self.port)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_debug(self.debug)
    }
}

/// All configured profiles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushkoConfig {
    /// Profiles by name.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl PushkoConfig {
    /// Load configuration from the first existing default path, with
    /// environment overrides. With no file, only the environment is used.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        for path in &CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::from_file(expanded.as_ref());
            }
        }

        debug!("No config file found, using environment only");
        Self::build(config::Config::builder())
    }

    /// Load configuration from a specific file, with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading config file");

        Self::build(config::Config::builder().add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(true),
        ))
    }

    /// Parse configuration from TOML text, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Look up a profile by name.
    ///
    /// Profile names are case-insensitive: the loader stores table keys
    /// lowercased, so lookups are lowercased too.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownProfile`] if no such profile exists.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigurationError> {
        let name = name.to_ascii_lowercase();
        match self.profiles.get(&name) {
            Some(profile) => Ok(profile),
            None => Err(ConfigurationError::UnknownProfile(name)),
        }
    }
}
