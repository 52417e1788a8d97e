//! # Types Module
//!
//! Data exchanged with the ML4K service.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ClassificationInput`] | Data to classify or train on (text, numbers, image) |
//! | [`Modality`] | Which kind of input a [`ClassificationInput`] is |
//! | [`Classification`] | Predicted label and confidence for one input |
//! | [`ModelStatus`] | Training progress reported by the service |
//! | [`ModelState`] | Interpretation of a [`ModelStatus`] code |

pub mod classification;
pub mod input;

pub use classification::{Classification, ModelState, ModelStatus};
pub use input::{ClassificationInput, Modality};
