//! # pushko-transport
//!
//! Transport abstraction layer for the Pushko client.
//!
//! The client signs requests and interprets responses; moving bytes over
//! the network is delegated to a [`Transport`]:
//!
//! - **HTTP** - reqwest over rustls (default `http` feature)
//!
//! Any other implementation (a test double, a proxying transport) only
//! needs to implement the one `send` method.
//!
//! ```rust,ignore
//! use pushko_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let response = transport.send(request).await?;
//! println!("{} {}", response.status, response.text());
//! ```

pub mod traits;

#[cfg(feature = "http")]
pub mod http;

pub use traits::{HttpRequest, HttpResponse, Transport, TransportError};

#[cfg(feature = "http")]
pub use http::HttpTransport;
