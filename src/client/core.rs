use crate::client::builder::Ml4kClientBuilder;
use crate::client::validation::KeyValidator;
use crate::decode;
use crate::request::{HttpRequest, RequestBuilder};
use crate::transport::{RawResponse, Transport};
use crate::types::{Classification, ClassificationInput, ModelStatus};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Entry point for the ML4K service.
///
/// Every call is a single blocking round trip: build the request, send it
/// through the injected [`Transport`], then decode or classify the outcome.
/// Nothing is retried or cached.
///
/// Cloning is cheap and shares the transport.
#[derive(Clone)]
pub struct Ml4kClient {
    pub(crate) api_key: String,
    pub(crate) validator: KeyValidator,
    pub(crate) requests: RequestBuilder,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) capture_error_body: bool,
}

impl Ml4kClient {
    /// Client for `api_key` using the default HTTP transport and service URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ml4kClientBuilder::new().api_key(api_key).build()
    }

    pub fn builder() -> Ml4kClientBuilder {
        Ml4kClientBuilder::new()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Replace the API key. The old key is kept if the new one is rejected.
    ///
    /// Takes `&mut self`: calls already running on a clone keep the key they
    /// were built with.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> Result<()> {
        let api_key = api_key.into();
        self.validator.validate(&api_key)?;
        self.api_key = api_key;
        info!("API key replaced");
        Ok(())
    }

    pub fn classify(&self, input: &ClassificationInput) -> Result<Classification> {
        let request = self.requests.classify(&self.api_key, input)?;
        let response = self.round_trip("classify", &request)?;
        decode::decode_classification(&input.echo(), &response.body)
            .map_err(|e| {
                warn!(operation = "classify", error = %e, "undecodable response");
                e
            })
    }

    /// Submit a labelled training example. The response body is ignored.
    pub fn add_training_data(&self, input: &ClassificationInput, label: &str) -> Result<()> {
        let request = self.requests.add_training_data(&self.api_key, input, label)?;
        self.round_trip("add_training_data", &request)?;
        Ok(())
    }

    pub fn model_status(&self) -> Result<ModelStatus> {
        let request = self.requests.status(&self.api_key);
        let response = self.round_trip("model_status", &request)?;
        decode::decode_model_status(&response.body)
            .map_err(|e| {
                warn!(operation = "model_status", error = %e, "undecodable response");
                e
            })
    }

    /// Ask the service to train a new model from the submitted examples.
    pub fn train(&self) -> Result<()> {
        let request = self.requests.train(&self.api_key);
        self.round_trip("train", &request)?;
        Ok(())
    }

    /// Send once and apply the status policy: 2xx passes through, anything
    /// else becomes [`Error::Service`] without looking at the body.
    fn round_trip(&self, operation: &'static str, request: &HttpRequest) -> Result<RawResponse> {
        debug!(operation, method = %request.method, "sending request");
        let response = self.transport.send(request).map_err(|e| {
            warn!(operation, error = %e, "service unreachable");
            Error::Connection(e)
        })?;

        if response.is_success() {
            return Ok(response);
        }

        warn!(
            operation,
            status = response.status_code,
            status_text = %response.status_text,
            "service rejected request"
        );
        Err(Error::Service {
            status_code: response.status_code,
            status_text: response.status_text,
            body: self.capture_error_body.then_some(response.body),
        })
    }
}

impl fmt::Debug for Ml4kClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ml4kClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.requests.base_url().as_str())
            .field("key_pattern", &self.validator.pattern())
            .field("capture_error_body", &self.capture_error_body)
            .finish_non_exhaustive()
    }
}
