//! # pushko-core
//!
//! Validated domain types for the Pushko push-messaging client.
//!
//! - **Channel** - Channel names and kinds (`private-`, `presence-`)
//! - **Socket** - Client connection ids
//! - **Validation** - Pre-flight checks run before anything is signed
//! - **Credentials** - App id, key, secret, and endpoint settings
//! - **Message** - Event payloads
//! - **Presence** - Presence member data

pub mod channel;
pub mod credentials;
pub mod message;
pub mod presence;
pub mod socket;
pub mod validation;

pub use channel::{ChannelKind, ChannelName, MAX_TRIGGER_CHANNELS};
pub use credentials::{ConfigurationError, Credentials, Endpoint, Secret};
pub use message::{EventPayload, Payload};
pub use presence::PresenceMember;
pub use socket::SocketId;
pub use validation::{validate_channel, validate_channels, validate_socket_id, ValidationError};
