//! # pushko
//!
//! Client library for a hosted push-messaging service.
//!
//! A [`Client`] holds an application's credentials and endpoint and offers
//! five operations:
//!
//! - [`Client::trigger`] - publish an event to up to 100 channels
//! - [`Client::get_channels`] - list occupied channels
//! - [`Client::get_channel_stats`] - fetch statistics for one channel
//! - [`Client::socket_auth`] - sign a private channel subscription
//! - [`Client::presence_auth`] - sign a presence channel subscription
//!
//! REST calls are signed with HMAC-SHA256 and sent through a pluggable
//! [`Transport`]; subscription signing is local and never touches the
//! network.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pushko::{Client, Credentials, Endpoint, TriggerOptions};
//! use serde_json::json;
//!
//! # async fn run() -> pushko::Result<()> {
//! let credentials = Credentials::new("1234", "278d425bdf160c739803", "7ad3773142a6692b25b8")?;
//! let client = Client::new(credentials, Endpoint::default())?;
//!
//! let outcome = client
//!     .trigger(&["my-channel"], "my-event", json!({"message": "hello"}), TriggerOptions::new())
//!     .await?;
//! assert!(outcome.is_accepted());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;

pub use client::{Client, Clock, TriggerOptions, TriggerOutcome, ACCEPTED_BODY};
pub use config::{Profile, PushkoConfig, DEFAULT_PROFILE};
pub use error::{PushkoError, Result};

pub use pushko_core::{
    ChannelKind, ChannelName, ConfigurationError, Credentials, Endpoint, Payload, PresenceMember,
    Secret, SocketId, ValidationError, MAX_TRIGGER_CHANNELS,
};
pub use pushko_protocol::AuthToken;
pub use pushko_transport::{HttpRequest, HttpResponse, Transport, TransportError};
