//! The client facade.
//!
//! Every call runs the same pipeline: validate inputs, build and sign the
//! request, hand it to the transport, and interpret the response. Nothing
//! is retained between calls.

use bytes::Bytes;
use pushko_core::{
    validate_channel, validate_channels, validate_socket_id, ChannelKind, Credentials, Endpoint,
    EventPayload, Payload, PresenceMember,
};
use pushko_protocol::signature::params;
use pushko_protocol::{
    authenticate_socket, body_md5, sign, unix_now, AuthToken, SignableRequest, SignedRequest,
};
use pushko_transport::{HttpRequest, HttpResponse, Transport};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{PushkoError, Result};
use crate::metrics::{self, RequestTimer};

/// Body the service returns when it accepts a triggered event.
pub const ACCEPTED_BODY: &str = "202 ACCEPTED\n";

/// Source of unix timestamps for signing.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Per-call trigger options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Connection to exclude from receiving the event.
    pub socket_id: Option<String>,
    /// Return the raw response body.
    pub debug: bool,
    /// Sign with this timestamp instead of the client clock.
    pub timestamp: Option<u64>,
}

impl TriggerOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a connection, usually the sender's own.
    #[must_use]
    pub fn exclude(mut self, socket_id: impl Into<String>) -> Self {
        self.socket_id = Some(socket_id.into());
        self
    }

    /// Request the raw response body.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Pin the auth timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// What the service made of a triggered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The event was accepted.
    Accepted,
    /// The service answered without accepting the event.
    Rejected {
        /// HTTP status of the response.
        status: u16,
    },
    /// Debug mode: the raw response body.
    Raw(String),
}

impl TriggerOutcome {
    /// Whether the event was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, TriggerOutcome::Accepted)
    }
}

#[derive(Deserialize)]
struct ChannelsResponse {
    channels: serde_json::Value,
}

/// Client for the push-messaging REST API.
///
/// Cheap to clone and safe to share: credentials and endpoint are read-only
/// and each call is an independent request.
#[derive(Clone)]
pub struct Client {
    credentials: Credentials,
    endpoint: Endpoint,
    transport: Arc<dyn Transport>,
    clock: Clock,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint)
            .field("transport", &self.transport.name())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`PushkoError::TransportUnavailable`] if the HTTP client
    /// cannot be initialised.
    #[cfg(feature = "http")]
    pub fn new(credentials: Credentials, endpoint: Endpoint) -> Result<Self> {
        let transport = pushko_transport::HttpTransport::new()?;
        Ok(Self::with_transport(credentials, endpoint, Arc::new(transport)))
    }

    /// Create a client from a named configuration profile.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile is unknown or
    /// incomplete, or [`PushkoError::TransportUnavailable`].
    #[cfg(feature = "http")]
    pub fn from_profile(config: &crate::config::PushkoConfig, name: &str) -> Result<Self> {
        let profile = config.profile(name)?;
        Self::new(profile.credentials(name)?, profile.endpoint())
    }

    /// Create a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(
        credentials: Credentials,
        endpoint: Endpoint,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            credentials,
            endpoint,
            transport,
            clock: Arc::new(unix_now),
        }
    }

    /// Replace the clock used for `auth_timestamp`.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get the credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn app_path(&self, suffix: &str) -> String {
        format!("/apps/{}{}", self.credentials.app_id(), suffix)
    }

    fn sign(&self, request: &SignableRequest, timestamp: Option<u64>) -> Result<SignedRequest> {
        let timestamp = timestamp.unwrap_or_else(|| (self.clock)());
        let signed = sign(
            self.credentials.key(),
            self.credentials.secret().expose(),
            request,
            Some(timestamp),
        )?;
        debug!(method = %signed.method, path = %signed.path, timestamp, "Signed request");
        Ok(signed)
    }

    async fn send(&self, operation: &'static str, request: HttpRequest) -> Result<HttpResponse> {
        let _timer = RequestTimer::start(operation);
        self.transport.send(request).await.map_err(|e| {
            metrics::record_error(operation);
            warn!(operation, transport = self.transport.name(), error = %e, "Request failed");
            PushkoError::from(e)
        })
    }

    /// Trigger an event on one or more channels.
    ///
    /// Returns [`TriggerOutcome::Accepted`] when the service accepts the
    /// event and per-call debug is off. Otherwise, with debug requested by
    /// the call or the endpoint, the raw body is returned; without it the
    /// outcome is [`TriggerOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Validation errors are raised before anything is sent. Transport
    /// failures are returned as errors and never retried.
    pub async fn trigger<S: AsRef<str>>(
        &self,
        channels: &[S],
        event: &str,
        data: impl Into<Payload>,
        options: TriggerOptions,
    ) -> Result<TriggerOutcome> {
        validate_channels(channels)?;
        validate_socket_id(options.socket_id.as_deref())?;

        let data: Payload = data.into();
        let body = EventPayload::new(event, &data, channels)?.to_json()?;

        let mut request = SignableRequest::post(self.app_path("/events"))
            .with_param(params::BODY_MD5, body_md5(body.as_bytes()));
        if let Some(socket_id) = &options.socket_id {
            request = request.with_param(params::SOCKET_ID, socket_id.clone());
        }
        let signed = self.sign(&request, options.timestamp)?;

        debug!(event = %event, channels = channels.len(), "Triggering event");

        let http = HttpRequest::new(
            signed.method,
            self.endpoint.url(&signed.path_and_query()),
            self.endpoint.timeout,
        )
        .with_json_body(body);
        let response = self.send("trigger", http).await?;
        let text = response.text();

        if text == ACCEPTED_BODY && !options.debug {
            Ok(TriggerOutcome::Accepted)
        } else if options.debug || self.endpoint.debug {
            Ok(TriggerOutcome::Raw(text.into_owned()))
        } else {
            metrics::record_soft_failure("trigger");
            warn!(event = %event, status = response.status, "Event not accepted");
            Ok(TriggerOutcome::Rejected {
                status: response.status,
            })
        }
    }

    /// List the application's occupied channels.
    ///
    /// Returns `None` when the service answers with anything but `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a `200` body cannot be decoded.
    pub async fn get_channels(&self) -> Result<Option<Vec<String>>> {
        let Some(body) = self.query("get_channels", self.app_path("/channels")).await? else {
            return Ok(None);
        };

        let response: ChannelsResponse = serde_json::from_slice(&body)
            .map_err(|e| PushkoError::InvalidResponse(e.to_string()))?;

        channel_names(response.channels).map(Some)
    }

    /// Fetch statistics for one channel.
    ///
    /// Returns `None` when the service answers with anything but `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad channel name, or an error if the
    /// request fails or a `200` body cannot be decoded.
    pub async fn get_channel_stats(
        &self,
        channel: impl AsRef<str>,
    ) -> Result<Option<serde_json::Value>> {
        let channel = channel.as_ref();
        validate_channel(channel)?;

        let path = self.app_path(&format!("/channels/{}/stats", channel));
        let Some(body) = self.query("get_channel_stats", path).await? else {
            return Ok(None);
        };

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| PushkoError::InvalidResponse(e.to_string()))
    }

    async fn query(&self, operation: &'static str, path: String) -> Result<Option<Bytes>> {
        let signed = self.sign(&SignableRequest::get(path), None)?;
        let http = HttpRequest::new(
            signed.method,
            self.endpoint.url(&signed.path_and_query()),
            self.endpoint.timeout,
        );
        let response = self.send(operation, http).await?;

        if response.is_ok() {
            Ok(Some(response.body))
        } else {
            metrics::record_soft_failure(operation);
            warn!(operation, status = response.status, "Query not answered with 200");
            Ok(None)
        }
    }

    /// Sign a private or presence channel subscription.
    ///
    /// With `data`, the encoded data is signed as a third component
    /// (`socket_id:channel:data`) and returned as `channel_data`. Channel and
    /// socket id may be plain strings or the validated
    /// [`ChannelName`](pushko_core::ChannelName) and
    /// [`SocketId`](pushko_core::SocketId).
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad channel name or socket id.
    pub fn socket_auth(
        &self,
        channel: impl AsRef<str>,
        socket_id: impl AsRef<str>,
        data: Option<Payload>,
    ) -> Result<AuthToken> {
        let (channel, socket_id) = (channel.as_ref(), socket_id.as_ref());
        validate_channel(channel)?;
        validate_socket_id(Some(socket_id))?;

        let channel_data = data.map(|d| d.encode()).transpose()?;
        let token = authenticate_socket(
            self.credentials.key(),
            self.credentials.secret().expose(),
            socket_id,
            channel,
            channel_data,
        )?;

        debug!(channel = %channel, socket_id = %socket_id, "Signed subscription");
        Ok(token)
    }

    /// Sign a presence channel subscription for a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad channel name or socket id.
    pub fn presence_auth(
        &self,
        channel: impl AsRef<str>,
        socket_id: impl AsRef<str>,
        user_id: impl Into<String>,
        user_info: Option<serde_json::Value>,
    ) -> Result<AuthToken> {
        let channel = channel.as_ref();
        if ChannelKind::of(channel) != ChannelKind::Presence {
            warn!(channel = %channel, "Presence auth requested for a non-presence channel");
        }

        // `null` info is left out of the member data entirely
        let mut member = PresenceMember::new(user_id);
        member.user_info = user_info.filter(|info| !info.is_null());

        self.socket_auth(channel, socket_id, Some(Payload::json(&member)?))
    }
}

/// Extract channel names from either `["a", "b"]` or `{"a": {...}, "b": {...}}`.
fn channel_names(channels: serde_json::Value) -> Result<Vec<String>> {
    match channels {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(name) => Ok(name),
                other => Err(PushkoError::InvalidResponse(format!(
                    "channel name is not a string: {}",
                    other
                ))),
            })
            .collect(),
        serde_json::Value::Object(map) => {
            let mut names: Vec<String> = map.into_iter().map(|(name, _)| name).collect();
            names.sort();
            Ok(names)
        }
        other => Err(PushkoError::InvalidResponse(format!(
            "unexpected channels field: {}",
            other
        ))),
    }
}
