//! Network boundary.
//!
//! The client never performs I/O itself: it hands built requests to a
//! [`Transport`]. [`HttpTransport`] talks to the real service,
//! [`ScriptedTransport`] replays canned responses for deterministic tests.

pub mod http;
pub mod scripted;

pub use http::HttpTransport;
pub use scripted::{RecordedCall, ScriptedTransport};

use crate::request::{HttpRequest, Method};
use url::Url;

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn new(status_code: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, "OK", body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// The service could not be reached (connect, DNS, TLS, timeout).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout(),
            TransportError::Other(_) => false,
        }
    }
}

/// Performs one HTTP round trip per call.
///
/// Implementations must return once the exchange completes or fails; they
/// must not retry.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;

    fn post(&self, url: &Url, body: &str) -> Result<RawResponse, TransportError>;

    /// Dispatch a built request on its method. Override to honour headers.
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        match request.method {
            Method::Get => self.get(&request.url),
            Method::Post => self.post(&request.url, request.body.as_deref().unwrap_or("")),
        }
    }
}
