//! HttpTransport against a local mock server.

mod common;

use common::{FAKE_KEY, GOOD_CLASSIFICATION};
use ml4k::transport::{HttpTransport, Transport};
use ml4k::{ClassificationInput, Error, Ml4kClient};
use mockito::{Matcher, Server};
use std::sync::Arc;
use std::time::Duration;

fn client_for(server: &Server) -> Ml4kClient {
    Ml4kClient::builder()
        .api_key(FAKE_KEY)
        .base_url(format!("{}/api/scratch", server.url()))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[test]
fn test_classify_text_over_http() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", format!("/api/scratch/{}/classify", FAKE_KEY).as_str())
        .match_query(Matcher::UrlEncoded("data".into(), "hello world".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GOOD_CLASSIFICATION)
        .create();

    let c = client_for(&server)
        .classify(&ClassificationInput::text("hello world"))
        .unwrap();
    assert_eq!(c.label(), "Good");
    mock.assert();
}

#[test]
fn test_classify_image_posts_fixed_length_json() {
    let mut server = Server::new();
    let body = r#"{"data":"YWJj"}"#;
    let mock = server
        .mock("POST", format!("/api/scratch/{}/classify", FAKE_KEY).as_str())
        .match_header("content-type", "application/json")
        .match_header("content-length", body.len().to_string().as_str())
        .match_body(body)
        .with_status(200)
        .with_body(GOOD_CLASSIFICATION)
        .create();

    client_for(&server)
        .classify(&ClassificationInput::image(b"abc".to_vec(), "abc.png"))
        .unwrap();
    mock.assert();
}

#[test]
fn test_status_text_comes_from_http_status() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", format!("/api/scratch/{}/status", FAKE_KEY).as_str())
        .with_status(503)
        .with_body("maintenance")
        .create();

    match client_for(&server).model_status().unwrap_err() {
        Error::Service {
            status_code,
            status_text,
            ..
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(status_text, "Service Unavailable");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[test]
fn test_unreachable_server_is_connection_error() {
    // Port 9 (discard) is closed on test machines; the connect fails fast.
    let client = Ml4kClient::builder()
        .api_key(FAKE_KEY)
        .base_url("http://127.0.0.1:9/api/scratch")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client.train().unwrap_err();
    assert!(err.is_connection(), "got {:?}", err);
}

#[test]
fn test_raw_get_and_post() {
    let mut server = Server::new();
    let get = server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body("pong")
        .create();
    let post = server
        .mock("POST", "/echo")
        .match_header("content-type", "application/json")
        .match_body("{}")
        .with_status(201)
        .with_body("created")
        .create();

    let transport = Arc::new(HttpTransport::with_timeout(Duration::from_secs(5)).unwrap());
    let base = url::Url::parse(&server.url()).unwrap();

    let r = transport.get(&base.join("/ping").unwrap()).unwrap();
    assert_eq!((r.status_code, r.body.as_str()), (200, "pong"));

    let r = transport.post(&base.join("/echo").unwrap(), "{}").unwrap();
    assert_eq!(r.status_code, 201);
    assert_eq!(r.status_text, "Created");

    get.assert();
    post.assert();
}
