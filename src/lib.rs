//! # ml4k
//!
//! Client for the Machine Learning for Kids ("ML4K") classification service.
//!
//! Submit text, numbers or images for classification, add labelled training
//! examples, start training and poll model status.
//!
//! ## Overview
//!
//! Every call follows the same pipeline:
//!
//! 1. the API key is validated once, when the client is built (or the key replaced);
//! 2. the [`request`] module builds a method/URL/body for the input's modality;
//! 3. a [`transport::Transport`] performs the single HTTP round trip;
//! 4. the [`decode`] module turns a 2xx body into a typed result.
//!
//! Non-2xx responses, unreachable servers and malformed bodies each map to
//! their own [`Error`] variant. Nothing is retried.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ml4k::{ClassificationInput, Ml4kClient};
//!
//! fn main() -> ml4k::Result<()> {
//!     let client = Ml4kClient::new(
//!         "00000000-0000-1000-0000-00000000000000000000-0000-4000-0000-000000000000",
//!     )?;
//!
//!     let result = client.classify(&ClassificationInput::text("I love this"))?;
//!     println!("{} ({}%)", result.label(), result.confidence());
//!
//!     client.add_training_data(&ClassificationInput::numbers([1.2, 3.4]), "tall")?;
//!     client.train()?;
//!     println!("{}", client.model_status()?.message());
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without a network
//!
//! ```rust
//! use ml4k::transport::{RawResponse, ScriptedTransport};
//! use ml4k::{ClassificationInput, Ml4kClient};
//! use std::sync::Arc;
//!
//! let transport = ScriptedTransport::always(RawResponse::ok(
//!     r#"[{"class_name":"Good","confidence":18.9}]"#,
//! ));
//! let client = Ml4kClient::builder()
//!     .api_key("00000000-0000-1000-0000-00000000000000000000-0000-4000-0000-000000000000")
//!     .transport(Arc::new(transport))
//!     .build()?;
//! assert_eq!(client.classify(&ClassificationInput::text("Test"))?.label(), "Good");
//! # Ok::<(), ml4k::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client facade, builder, key validation, background dispatch |
//! | [`request`] | Per-modality request construction |
//! | [`transport`] | Transport trait, HTTP and scripted implementations |
//! | [`decode`] | Response body decoding |
//! | [`types`] | Inputs and results |

pub mod client;
pub mod decode;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{KeyValidator, Ml4kClient, Ml4kClientBuilder};
pub use types::{Classification, ClassificationInput, Modality, ModelState, ModelStatus};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
