//! Results returned by the service.

use serde::Serialize;
use std::fmt;

/// A predicted label for one submitted input.
///
/// Only produced by [`crate::decode::decode_classification`]; fields are
/// read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    input: String,
    label: String,
    confidence: f64,
}

impl Classification {
    pub(crate) fn new(input: String, label: String, confidence: f64) -> Self {
        Self {
            input,
            label,
            confidence,
        }
    }

    /// The data that was classified, in string form.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The predicted class name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Confidence of the prediction, in `[0, 100]`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}': classified as '{}' with {}% confidence.",
            self.input, self.label, self.confidence
        )
    }
}

/// Training progress of the model behind an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStatus {
    status_code: i64,
    message: String,
}

impl ModelStatus {
    pub(crate) fn new(status_code: i64, message: String) -> Self {
        Self {
            status_code,
            message,
        }
    }

    /// Raw status code as reported by the service.
    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    /// Human readable status message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn state(&self) -> ModelState {
        ModelState::from_code(self.status_code)
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ModelState::Ready
    }
}

/// Well-known status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelState {
    Error,
    Training,
    Ready,
    Unknown(i64),
}

impl ModelState {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ModelState::Error,
            1 => ModelState::Training,
            2 => ModelState::Ready,
            other => ModelState::Unknown(other),
        }
    }
}
