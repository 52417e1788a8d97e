use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for encoding and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field or setting that caused the error (e.g., "input.numbers[2]", "builder.base_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending value)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "request_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Every failure a client call can surface.
///
/// Each variant is a distinct cause so callers can tell "no internet" apart
/// from "bad key" or "the service rejected the request".
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid API key: {reason}")]
    InvalidKey { reason: String },

    #[error("Encoding error: {message}{}", format_context(.context))]
    Encoding {
        message: String,
        context: ErrorContext,
    },

    #[error("No connection to the service: {0}")]
    Connection(#[from] TransportError),

    #[error("Service error: HTTP {status_code} {status_text}{}", format_body(.body))]
    Service {
        status_code: u16,
        status_text: String,
        body: Option<String>,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
        body: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Background dispatch error: {message}")]
    Dispatch { message: String },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_body(body: &Option<String>) -> String {
    match body.as_deref().map(str::trim) {
        Some(b) if !b.is_empty() => format!(": {}", b),
        _ => String::new(),
    }
}

impl Error {
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Error::InvalidKey {
            reason: reason.into(),
        }
    }

    pub fn encoding_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Encoding {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn malformed(msg: impl Into<String>, body: &str) -> Self {
        Error::MalformedResponse {
            message: msg.into(),
            body: body.to_string(),
            source: None,
        }
    }

    pub(crate) fn malformed_json(source: serde_json::Error, body: &str) -> Self {
        Error::MalformedResponse {
            message: format!("body is not valid JSON: {}", source),
            body: body.to_string(),
            source: Some(source),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Encoding { context, .. } | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status of a service rejection, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Service { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// True when the service could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Error::InvalidKey { .. })
    }
}
