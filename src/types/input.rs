//! Inputs accepted by the classifier.

use base64::Engine as _;
use std::fmt;

/// Data submitted for classification or as a training example.
///
/// Each variant selects its own encoding: text and numbers travel in the
/// query string of a GET, images travel base64-encoded in a JSON POST body.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationInput {
    Text(String),
    Numbers(Vec<f64>),
    Image {
        bytes: Vec<u8>,
        /// Path or other identifier of where the bytes came from.
        source: String,
    },
}

/// Kind of input, used for logging and request dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Numbers,
    Image,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modality::Text => "text",
            Modality::Numbers => "numbers",
            Modality::Image => "image",
        };
        f.write_str(name)
    }
}

impl ClassificationInput {
    pub fn text(text: impl Into<String>) -> Self {
        ClassificationInput::Text(text.into())
    }

    pub fn numbers(values: impl IntoIterator<Item = f64>) -> Self {
        ClassificationInput::Numbers(values.into_iter().collect())
    }

    /// Image bytes read by the caller, tagged with where they came from.
    pub fn image(bytes: impl Into<Vec<u8>>, source: impl Into<String>) -> Self {
        ClassificationInput::Image {
            bytes: bytes.into(),
            source: source.into(),
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            ClassificationInput::Text(_) => Modality::Text,
            ClassificationInput::Numbers(_) => Modality::Numbers,
            ClassificationInput::Image { .. } => Modality::Image,
        }
    }

    /// String form echoed back in [`crate::Classification::input`].
    pub fn echo(&self) -> String {
        match self {
            ClassificationInput::Text(text) => text.clone(),
            ClassificationInput::Numbers(values) => {
                let parts: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
                format!("[{}]", parts.join(", "))
            }
            ClassificationInput::Image { source, .. } => source.clone(),
        }
    }

    /// Standard-alphabet base64 of the image bytes, `None` for other modalities.
    pub fn image_base64(&self) -> Option<String> {
        match self {
            ClassificationInput::Image { bytes, .. } => {
                Some(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            _ => None,
        }
    }
}

impl From<&str> for ClassificationInput {
    fn from(text: &str) -> Self {
        ClassificationInput::text(text)
    }
}

impl From<String> for ClassificationInput {
    fn from(text: String) -> Self {
        ClassificationInput::Text(text)
    }
}

impl From<Vec<f64>> for ClassificationInput {
    fn from(values: Vec<f64>) -> Self {
        ClassificationInput::Numbers(values)
    }
}

impl From<&[f64]> for ClassificationInput {
    fn from(values: &[f64]) -> Self {
        ClassificationInput::Numbers(values.to_vec())
    }
}
