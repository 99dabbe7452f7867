//! Dispatcher behavior against a mock OpenRosa endpoint.

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kobo_submit::{DEFAULT_REQUEST_TIMEOUT, DispatchStatus, build_client, dispatch};

const SAMPLE_XML: &[u8] =
    b"<?xml version=\"1.0\" encoding=\"utf-8\"?><data id=\"proj\"><start>2024-06-01</start></data>";

#[tokio::test]
async fn posts_multipart_file_upload_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submissions"))
        .and(header("Authorization", "Token secret"))
        .and(body_string_contains("name=\"xml_submission_file\""))
        .and(body_string_contains("filename=\"data.xml\""))
        .and(body_string_contains("<data id=\"proj\">"))
        .respond_with(ResponseTemplate::new(201).set_body_string("<OpenRosaResponse/>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(DEFAULT_REQUEST_TIMEOUT).unwrap();
    let endpoint = format!("{}/api/v1/submissions", server.uri());
    let outcome = dispatch(
        &client,
        &endpoint,
        "secret",
        "1".to_string(),
        SAMPLE_XML.to_vec(),
    )
    .await;

    assert!(outcome.is_success());
    match outcome.status {
        DispatchStatus::Delivered { status, body } => {
            assert_eq!(status, 201);
            assert_eq!(body, "<OpenRosaResponse/>");
        }
        DispatchStatus::Failed { error } => panic!("unexpected failure: {error}"),
    }
}

#[tokio::test]
async fn http_error_is_recorded_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(DEFAULT_REQUEST_TIMEOUT).unwrap();
    let outcome = dispatch(
        &client,
        &server.uri(),
        "secret",
        "1".to_string(),
        SAMPLE_XML.to_vec(),
    )
    .await;

    assert!(!outcome.is_success());
    match outcome.status {
        DispatchStatus::Delivered { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "server error");
        }
        DispatchStatus::Failed { error } => panic!("expected delivered outcome, got: {error}"),
    }
}

#[tokio::test]
async fn transport_failure_is_recorded_not_raised() {
    let client = build_client(DEFAULT_REQUEST_TIMEOUT).unwrap();
    // Nothing listens on this port.
    let outcome = dispatch(
        &client,
        "http://127.0.0.1:1/submissions",
        "secret",
        "1".to_string(),
        SAMPLE_XML.to_vec(),
    )
    .await;

    assert!(!outcome.is_success());
    assert!(matches!(outcome.status, DispatchStatus::Failed { .. }));
    assert_eq!(outcome.parent_key, "1");
}
