//! Deterministic transport for tests.

use super::{RawResponse, Transport, TransportError};
use crate::request::Method;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;

/// One call observed by a [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub url: Url,
    pub body: Option<String>,
}

enum Reply {
    Response(RawResponse),
    Failure(String),
}

#[derive(Default)]
struct Script {
    queued: VecDeque<Reply>,
    fallback: Option<RawResponse>,
    calls: Vec<RecordedCall>,
}

/// Replays queued responses in order, then the fallback response (if any).
///
/// Clones share the same script, so a test can keep one handle while the
/// client owns another.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call with `response` once the queue is drained.
    pub fn always(response: RawResponse) -> Self {
        let transport = Self::new();
        transport.lock().fallback = Some(response);
        transport
    }

    pub fn push_response(&self, response: RawResponse) -> &Self {
        self.lock().queued.push_back(Reply::Response(response));
        self
    }

    /// Queue a connectivity failure.
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.lock().queued.push_back(Reply::Failure(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from the others.
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn reply(&self, call: RecordedCall) -> Result<RawResponse, TransportError> {
        let mut script = self.lock();
        script.calls.push(call);
        match script.queued.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(TransportError::Other(message)),
            None => script.fallback.clone().ok_or_else(|| {
                TransportError::Other("scripted transport has no response queued".to_string())
            }),
        }
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        self.reply(RecordedCall {
            method: Method::Get,
            url: url.clone(),
            body: None,
        })
    }

    fn post(&self, url: &Url, body: &str) -> Result<RawResponse, TransportError> {
        self.reply(RecordedCall {
            method: Method::Post,
            url: url.clone(),
            body: Some(body.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.test/a").unwrap()
    }

    #[test]
    fn replays_queue_then_fallback() {
        let t = ScriptedTransport::always(RawResponse::ok("fallback"));
        t.push_response(RawResponse::ok("first"))
            .push_failure("offline");

        assert_eq!(t.get(&url()).unwrap().body, "first");
        assert!(t.post(&url(), "x").is_err());
        assert_eq!(t.get(&url()).unwrap().body, "fallback");
        assert_eq!(t.call_count(), 3);
        assert_eq!(t.calls()[1].body.as_deref(), Some("x"));
    }

    #[test]
    fn empty_script_fails() {
        let t = ScriptedTransport::new();
        assert!(matches!(t.get(&url()), Err(TransportError::Other(_))));
    }
}
