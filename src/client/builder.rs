use crate::client::core::Ml4kClient;
use crate::client::validation::KeyValidator;
use crate::request::{RequestBuilder, DEFAULT_BASE_URL};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`Ml4kClient`].
///
/// Unset values fall back to the environment:
/// - `ML4K_API_KEY` when no key is given
/// - `ML4K_BASE_URL` when no base URL is given
/// - `ML4K_HTTP_TIMEOUT_SECS` / `ML4K_PROXY_URL` for the default HTTP transport
pub struct Ml4kClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    key_pattern: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
    capture_error_body: bool,
}

impl Ml4kClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            key_pattern: None,
            transport: None,
            timeout: None,
            capture_error_body: false,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Service root the key and endpoint are appended to.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Replace the default key format with a custom regular expression.
    pub fn key_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.key_pattern = Some(pattern.into());
        self
    }

    /// Inject the transport. Defaults to [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Timeout for the default HTTP transport. Ignored when a transport is injected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Keep the body of non-2xx responses in [`Error::Service`] for diagnostics.
    ///
    /// Off by default; the body is never decoded either way.
    pub fn capture_error_body(mut self, enable: bool) -> Self {
        self.capture_error_body = enable;
        self
    }

    /// Validate the key and assemble the client. No request is sent.
    pub fn build(self) -> Result<Ml4kClient> {
        let validator = match self.key_pattern.as_deref() {
            Some(pattern) => KeyValidator::with_pattern(pattern)?,
            None => KeyValidator::default(),
        };

        let api_key = self
            .api_key
            .or_else(|| std::env::var("ML4K_API_KEY").ok())
            .ok_or_else(|| Error::invalid_key("no API key given"))?;
        validator.validate(&api_key)?;

        let base_url = self
            .base_url
            .or_else(|| std::env::var("ML4K_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let requests = RequestBuilder::new(&base_url)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => match self.timeout {
                Some(timeout) => Arc::new(HttpTransport::with_timeout(timeout)?),
                None => Arc::new(HttpTransport::new()?),
            },
        };

        Ok(Ml4kClient {
            api_key,
            validator,
            requests,
            transport,
            capture_error_body: self.capture_error_body,
        })
    }
}

impl Default for Ml4kClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
