//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ml4k::transport::{RawResponse, ScriptedTransport};
use ml4k::Ml4kClient;
use std::sync::Arc;

pub const FAKE_KEY: &str =
    "00000000-0000-1000-0000-00000000000000000000-0000-4000-0000-000000000000";

pub const GOOD_CLASSIFICATION: &str = r#"[{"class_name":"Good","confidence":18.9}]"#;

/// Client wired to `transport`, which the test keeps a handle to.
pub fn scripted_client(transport: &ScriptedTransport) -> Ml4kClient {
    Ml4kClient::builder()
        .api_key(FAKE_KEY)
        .transport(Arc::new(transport.clone()))
        .build()
        .expect("fake key is valid")
}

pub fn server_error() -> RawResponse {
    RawResponse::new(500, "Internal Server Error", r#"{"error":"boom"}"#)
}
