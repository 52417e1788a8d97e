use super::{RawResponse, Transport, TransportError};
use crate::request::{HttpRequest, Method};
use crate::{Error, ErrorContext, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use once_cell::sync::OnceCell;
use reqwest::Proxy;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("ml4k-rust/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP transport backed by `reqwest`.
///
/// Always carries a finite timeout so an unreachable server surfaces as a
/// [`TransportError`] instead of a hang.
///
/// The underlying `reqwest::blocking::Client` owns a private runtime, so it is
/// only built on the first request, on whichever thread sends it. Inside tokio
/// that is the blocking pool used by the client's `spawn_*` helpers. Clones
/// share one client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Arc<LazyClient>,
    timeout: Duration,
}

#[derive(Debug)]
struct LazyClient {
    cell: OnceCell<Client>,
    proxy: Option<Proxy>,
}

impl Drop for LazyClient {
    fn drop(&mut self) {
        // Shutting down the client's runtime blocks, which tokio forbids on
        // its worker threads.
        if let Some(client) = self.cell.take() {
            if tokio::runtime::Handle::try_current().is_ok() {
                std::thread::spawn(move || drop(client));
            }
        }
    }
}

impl HttpTransport {
    /// Transport with env-overridable defaults:
    /// - `ML4K_HTTP_TIMEOUT_SECS` (default 30, zero ignored)
    /// - `ML4K_PROXY_URL`
    pub fn new() -> Result<Self> {
        let timeout = env::var("ML4K_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self::with_timeout(timeout)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "HTTP timeout must be greater than zero",
                ErrorContext::new().with_field_path("builder.timeout"),
            ));
        }

        let proxy = match env::var("ML4K_PROXY_URL") {
            Ok(proxy_url) => Some(Proxy::all(&proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("ML4K_PROXY_URL")
                        .with_details(proxy_url.as_str()),
                )
            })?),
            Err(_) => None,
        };

        Ok(Self {
            inner: Arc::new(LazyClient {
                cell: OnceCell::new(),
                proxy,
            }),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn client(&self) -> std::result::Result<&Client, TransportError> {
        self.inner.cell.get_or_try_init(|| {
            debug!(timeout_secs = self.timeout.as_secs_f64(), "building HTTP client");
            let mut builder = Client::builder()
                .timeout(self.timeout)
                .connect_timeout(self.timeout)
                .user_agent(USER_AGENT);
            if let Some(proxy) = &self.inner.proxy {
                builder = builder.proxy(proxy.clone());
            }
            Ok(builder.build()?)
        })
    }

    fn execute(&self, request: RequestBuilder) -> std::result::Result<RawResponse, TransportError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok(RawResponse {
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> std::result::Result<RawResponse, TransportError> {
        self.execute(self.client()?.get(url.clone()))
    }

    fn post(&self, url: &Url, body: &str) -> std::result::Result<RawResponse, TransportError> {
        self.execute(
            self.client()?
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string()),
        )
    }

    fn send(&self, request: &HttpRequest) -> std::result::Result<RawResponse, TransportError> {
        let client = self.client()?;
        let mut builder = match request.method {
            Method::Get => client.get(request.url.clone()),
            Method::Post => client
                .post(request.url.clone())
                .body(request.body.clone().unwrap_or_default()),
        };
        for (name, value) in &request.headers {
            // hyper derives the length from the body
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        self.execute(builder)
    }
}
