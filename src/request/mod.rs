//! Request construction.
//!
//! Turns an operation and (optionally) a [`ClassificationInput`] into a
//! transport-agnostic [`HttpRequest`]. Nothing here performs I/O.
//!
//! | Operation | Method | Endpoint | Payload |
//! |-----------|--------|----------|---------|
//! | classify text / numbers | GET | `classify` | `data` query parameter(s) |
//! | classify image | POST | `classify` | `{"data": "<base64>"}` |
//! | add training data | same as classify | `train` | plus `label` |
//! | model status | GET | `status` | none |
//! | train | POST | `models` | `{}` |

pub mod query;

use crate::types::ClassificationInput;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

/// Default service root; the API key and endpoint are appended as path segments.
pub const DEFAULT_BASE_URL: &str = "https://machinelearningforkids.co.uk/api/scratch";

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote operations exposed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Classify,
    AddTrainingData { label: String },
    Status,
    Train,
}

impl Operation {
    /// Last path segment of the operation's endpoint.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Classify => "classify",
            Operation::AddTrainingData { .. } => "train",
            Operation::Status => "status",
            Operation::Train => "models",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Classify => "classify",
            Operation::AddTrainingData { .. } => "add_training_data",
            Operation::Status => "model_status",
            Operation::Train => "train",
        }
    }
}

/// A fully built request, ready to hand to a [`crate::transport::Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: vec![("Accept".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: None,
        }
    }

    fn post_json(url: Url, body: String) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: vec![
                ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
                ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
                ("Content-Length".to_string(), body.len().to_string()),
            ],
            body: Some(body),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Serialize)]
struct ImagePayload<'a> {
    data: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

/// Builds requests against one service root.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
}

impl RequestBuilder {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("builder.base_url")
                    .with_details(base_url),
            )
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "Base URL must be an absolute http(s) URL",
                ErrorContext::new()
                    .with_field_path("builder.base_url")
                    .with_details(base_url.as_str()),
            ));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<key>/<endpoint>`, with the key as a single path segment.
    ///
    /// Keys accepted by [`KeyValidator`](crate::client::KeyValidator) contain
    /// only path characters and appear in the URL unchanged.
    pub fn endpoint_url(&self, api_key: &str, operation: &Operation) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(api_key)
                .push(operation.endpoint());
        }
        url
    }

    pub fn classify(&self, api_key: &str, input: &ClassificationInput) -> Result<HttpRequest> {
        self.with_input(api_key, &Operation::Classify, input)
    }

    pub fn add_training_data(
        &self,
        api_key: &str,
        input: &ClassificationInput,
        label: &str,
    ) -> Result<HttpRequest> {
        let operation = Operation::AddTrainingData {
            label: label.to_string(),
        };
        self.with_input(api_key, &operation, input)
    }

    pub fn status(&self, api_key: &str) -> HttpRequest {
        let request = HttpRequest::get(self.endpoint_url(api_key, &Operation::Status));
        debug!(operation = "model_status", method = %request.method, "built request");
        request
    }

    pub fn train(&self, api_key: &str) -> HttpRequest {
        let request =
            HttpRequest::post_json(self.endpoint_url(api_key, &Operation::Train), "{}".into());
        debug!(operation = "train", method = %request.method, "built request");
        request
    }

    fn with_input(
        &self,
        api_key: &str,
        operation: &Operation,
        input: &ClassificationInput,
    ) -> Result<HttpRequest> {
        let label = match operation {
            Operation::AddTrainingData { label } => Some(label.as_str()),
            _ => None,
        };
        let mut url = self.endpoint_url(api_key, operation);

        let request = match input {
            ClassificationInput::Text(text) => {
                let mut pairs = vec![(query::DATA_PARAM, text.clone())];
                if let Some(label) = label {
                    pairs.push(("label", label.to_string()));
                }
                query::append_pairs(&mut url, &pairs);
                HttpRequest::get(url)
            }
            ClassificationInput::Numbers(values) => {
                let mut pairs = query::number_pairs(values)?;
                if let Some(label) = label {
                    pairs.push(("label", label.to_string()));
                }
                query::append_pairs(&mut url, &pairs);
                HttpRequest::get(url)
            }
            ClassificationInput::Image { bytes, source } => {
                if bytes.is_empty() {
                    return Err(Error::encoding_with_context(
                        "image payload is empty",
                        ErrorContext::new()
                            .with_field_path("input.image")
                            .with_details(source.as_str())
                            .with_source("request_builder"),
                    ));
                }
                let data = input.image_base64().unwrap_or_default();
                let body = serde_json::to_string(&ImagePayload { data: &data, label })
                    .map_err(|e| {
                        Error::encoding_with_context(
                            format!("could not serialize image payload: {}", e),
                            ErrorContext::new()
                                .with_field_path("input.image")
                                .with_source("request_builder"),
                        )
                    })?;
                HttpRequest::post_json(url, body)
            }
        };

        debug!(
            operation = operation.name(),
            modality = %input.modality(),
            method = %request.method,
            "built request"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "00000000-0000-1000-0000-00000000000000000000-0000-4000-0000-000000000000";

    fn builder() -> RequestBuilder {
        RequestBuilder::new(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn validated_custom_key_is_embedded_verbatim() {
        let key = "team_1~blue:key@x";
        crate::client::KeyValidator::with_pattern(r"^.+$")
            .unwrap()
            .validate(key)
            .unwrap();
        let url = builder().endpoint_url(key, &Operation::Train);
        assert_eq!(
            url.as_str(),
            format!("{}/{}/models", DEFAULT_BASE_URL, key)
        );
    }

    #[test]
    fn endpoint_embeds_key_verbatim() {
        let url = builder().endpoint_url(KEY, &Operation::Classify);
        assert_eq!(
            url.as_str(),
            format!(
                "https://machinelearningforkids.co.uk/api/scratch/{}/classify",
                KEY
            )
        );
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        let b = RequestBuilder::new("http://localhost:8080/api/scratch/").unwrap();
        assert_eq!(
            b.endpoint_url("k", &Operation::Status).as_str(),
            "http://localhost:8080/api/scratch/k/status"
        );
    }

    #[test]
    fn invalid_base_urls_are_configuration_errors() {
        assert!(matches!(
            RequestBuilder::new("not a url"),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            RequestBuilder::new("mailto:someone@example.com"),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn text_is_form_encoded_in_a_get() {
        let input = ClassificationInput::text("hello world & more");
        let req = builder().classify(KEY, &input).unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url.query(), Some("data=hello+world+%26+more"));
        assert!(req.body.is_none());
        assert_eq!(input, ClassificationInput::text("hello world & more"));
    }

    #[test]
    fn numbers_become_repeated_data_params() {
        let input = ClassificationInput::numbers([1.2, 3.4]);
        let req = builder().classify(KEY, &input).unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url.query(), Some("data=1.2&data=3.4"));
        assert_eq!(query::parse_numbers(&req.url).unwrap(), vec![1.2, 3.4]);
    }

    #[test]
    fn empty_numbers_have_no_query() {
        let req = builder()
            .classify(KEY, &ClassificationInput::numbers([]))
            .unwrap();
        assert_eq!(req.url.query(), None);
    }

    #[test]
    fn image_is_posted_as_base64_json() {
        let input = ClassificationInput::image(b"abc".to_vec(), "abc.png");
        let req = builder().classify(KEY, &input).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url.query(), None);
        let body = req.body.as_deref().unwrap();
        assert_eq!(body, r#"{"data":"YWJj"}"#);
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("Content-Length"), Some(body.len().to_string().as_str()));
    }

    #[test]
    fn empty_image_fails_to_encode() {
        let err = builder()
            .classify(KEY, &ClassificationInput::image(Vec::new(), "blank.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));
    }

    #[test]
    fn training_data_targets_train_endpoint_with_label() {
        let b = builder();
        let text = b
            .add_training_data(KEY, &ClassificationInput::text("Test"), "123")
            .unwrap();
        assert!(text.url.path().ends_with("/train"));
        assert_eq!(text.url.query(), Some("data=Test&label=123"));

        let numbers = b
            .add_training_data(KEY, &ClassificationInput::numbers([1.2, 3.4]), "Test")
            .unwrap();
        assert_eq!(numbers.url.query(), Some("data=1.2&data=3.4&label=Test"));

        let image = b
            .add_training_data(KEY, &ClassificationInput::image(b"abc".to_vec(), "a"), "cat")
            .unwrap();
        assert_eq!(image.body.as_deref(), Some(r#"{"data":"YWJj","label":"cat"}"#));
    }

    #[test]
    fn status_and_train_use_their_own_endpoints() {
        let b = builder();
        let status = b.status(KEY);
        assert_eq!(status.method, Method::Get);
        assert!(status.url.path().ends_with(&format!("{}/status", KEY)));

        let train = b.train(KEY);
        assert_eq!(train.method, Method::Post);
        assert!(train.url.path().ends_with(&format!("{}/models", KEY)));
        assert_eq!(train.body.as_deref(), Some("{}"));
    }
}
