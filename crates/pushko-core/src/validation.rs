//! Pre-flight validation.
//!
//! Every facade call validates its channel names and socket id here before
//! anything is signed or sent.

use thiserror::Error;
use tracing::debug;

use crate::channel::{is_valid_channel_name, MAX_TRIGGER_CHANNELS};
use crate::socket::is_valid_socket_id;

/// Validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Channel name is empty or uses characters outside the channel alphabet.
    #[error("Invalid channel name: {0:?}")]
    InvalidChannelName(String),

    /// Socket id does not have the `<digits>.<digits>` shape.
    #[error("Invalid socket id: {0:?}")]
    InvalidSocketId(String),

    /// More channels than a single trigger accepts.
    #[error("Too many channels: {count} exceeds maximum {MAX_TRIGGER_CHANNELS}")]
    TooManyChannels {
        /// Number of channels supplied.
        count: usize,
    },
}

/// Validate a single channel name.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidChannelName`] if the name is invalid.
pub fn validate_channel(name: &str) -> Result<(), ValidationError> {
    if is_valid_channel_name(name) {
        Ok(())
    } else {
        debug!(channel = %name, "Rejected channel name");
        Err(ValidationError::InvalidChannelName(name.to_string()))
    }
}

/// Validate the channel list of a trigger.
///
/// The count limit is checked first; then every name, reporting the first
/// invalid one.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyChannels`] or
/// [`ValidationError::InvalidChannelName`].
pub fn validate_channels<S: AsRef<str>>(names: &[S]) -> Result<(), ValidationError> {
    if names.len() > MAX_TRIGGER_CHANNELS {
        return Err(ValidationError::TooManyChannels { count: names.len() });
    }
    names
        .iter()
        .try_for_each(|name| validate_channel(name.as_ref()))
}

/// Validate an optional socket id. Absent ids are always accepted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidSocketId`] if the id is present and malformed.
pub fn validate_socket_id(id: Option<&str>) -> Result<(), ValidationError> {
    match id {
        Some(id) if !is_valid_socket_id(id) => {
            debug!(socket_id = %id, "Rejected socket id");
            Err(ValidationError::InvalidSocketId(id.to_string()))
        }
        _ => Ok(()),
    }
}
