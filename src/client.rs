//! Client facade for the ML4K service.
//!
//! Keep the public surface small: one client, one builder, four operations.
//! Implementation details are split into submodules under `src/client/`.

mod background;
pub mod builder;
pub mod core;
pub mod validation;

pub use builder::Ml4kClientBuilder;
pub use core::Ml4kClient;
pub use validation::{KeyValidator, DEFAULT_KEY_PATTERN};
