use std::net::TcpListener;
use std::time::Duration;

use askchat::{AnswerClient, AskError, HttpAnswerClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An address nothing is listening on.
fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn ask_posts_json_question_and_reads_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "question": "What is 2+2?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": "4", "source": "calc.txt" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(&server.uri(), None).unwrap();
    let answer = client.ask("What is 2+2?").await.expect("answer");
    assert_eq!(answer.answer, "4");
    assert_eq!(answer.source, "calc.txt");
}

#[tokio::test]
async fn ask_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(&server.uri(), None).unwrap();
    let err = client.ask("hello").await.unwrap_err();
    assert!(matches!(err, AskError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn ask_fails_on_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(&server.uri(), None).unwrap();
    let err = client.ask("hello").await.unwrap_err();
    assert!(matches!(err, AskError::Decode { .. }));
}

#[tokio::test]
async fn ask_fails_on_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "4" })))
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(&server.uri(), None).unwrap();
    let err = client.ask("hello").await.unwrap_err();
    assert!(matches!(err, AskError::Decode { .. }));
}

#[tokio::test]
async fn ask_fails_when_connection_refused() {
    let client = HttpAnswerClient::new(&refused_url(), None).unwrap();
    let err = client.ask("hello").await.unwrap_err();
    assert!(matches!(err, AskError::Transport { .. }));
}

#[tokio::test]
async fn ask_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "answer": "late", "source": "none" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(&server.uri(), Some(Duration::from_millis(200))).unwrap();
    let err = client.ask("hello").await.unwrap_err();
    assert!(matches!(err, AskError::Transport { .. }));
}

#[tokio::test]
async fn health_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Backend running" })))
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(&format!("{}/", server.uri()), None).unwrap();
    assert_eq!(client.health().await.unwrap(), "Backend running");
}

#[tokio::test]
async fn health_fails_when_down() {
    let client = HttpAnswerClient::new(&refused_url(), None).unwrap();
    assert!(client.health().await.is_err());
}
