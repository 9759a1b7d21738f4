use std::net::TcpListener;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use triage_core::{FileHandle, InputSource, SubmissionRequest, SubmitError};
use triage_engine::{Classifier, ClientSettings, ReqwestClassifier};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn classifier_for(server: &MockServer) -> ReqwestClassifier {
    ReqwestClassifier::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
}

fn request(text: &str, file: Option<FileHandle>) -> SubmissionRequest {
    let mut input = InputSource::new();
    input.set_text(text);
    if let Some(file) = file {
        input.set_file(file).expect("valid file");
    }
    SubmissionRequest::from_input(&input).expect("non-empty input")
}

async fn single_body(server: &MockServer) -> String {
    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    String::from_utf8_lossy(&received[0].body).into_owned()
}

#[tokio::test]
async fn text_only_request_posts_one_text_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "category": "Produtivo",
            "confidence": 0.92
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = classifier_for(&server)
        .analyze(&request("Please refund my order", None))
        .await
        .expect("analyze ok");
    assert_eq!(data["category"], "Produtivo");

    let body = single_body(&server).await;
    assert!(body.contains("name=\"email_text\""));
    assert!(body.contains("Please refund my order"));
    assert!(!body.contains("name=\"email_file\""));
}

#[tokio::test]
async fn file_and_text_are_both_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let file = FileHandle::new("invoice.txt", b"Invoice 42 is overdue".to_vec());
    classifier_for(&server)
        .analyze(&request("see attached", Some(file)))
        .await
        .expect("analyze ok");

    let body = single_body(&server).await;
    assert!(body.contains("name=\"email_file\"; filename=\"invoice.txt\""));
    assert!(body.contains("text/plain"));
    assert!(body.contains("Invoice 42 is overdue"));
    assert!(body.contains("name=\"email_text\""));
    assert!(body.contains("see attached"));
}

#[tokio::test]
async fn server_detail_becomes_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "model unavailable" })),
        )
        .mount(&server)
        .await;

    let err = classifier_for(&server)
        .analyze(&request("hello", None))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SubmitError::Request {
            status: 500,
            message: "model unavailable".to_string()
        }
    );
    assert_eq!(err.to_string(), "model unavailable");
}

#[tokio::test]
async fn html_error_page_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw("<html>Bad Gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = classifier_for(&server)
        .analyze(&request("hello", None))
        .await
        .unwrap_err();
    assert_eq!(err, SubmitError::Protocol);
}

#[tokio::test]
async fn slow_server_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let classifier = ReqwestClassifier::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    });
    let err = classifier.analyze(&request("hello", None)).await.unwrap_err();
    assert_eq!(err, SubmitError::transport("request timed out"));
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let classifier = ReqwestClassifier::new(ClientSettings {
        base_url: server.uri(),
        max_response_bytes: 16,
        ..ClientSettings::default()
    });
    let err = classifier.analyze(&request("hello", None)).await.unwrap_err();
    assert!(matches!(err, SubmitError::Transport { .. }));
    assert!(err.to_string().contains("16 bytes"));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let classifier = ReqwestClassifier::new(ClientSettings {
        base_url: format!("http://127.0.0.1:{port}"),
        ..ClientSettings::default()
    });

    let err = classifier.analyze(&request("hello", None)).await.unwrap_err();
    assert!(matches!(err, SubmitError::Transport { .. }));
}

#[tokio::test]
async fn health_probe_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    assert_eq!(classifier_for(&server).health().await, Ok(()));

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;
    assert!(matches!(
        classifier_for(&down).health().await,
        Err(SubmitError::Request { status: 503, .. })
    ));
}
