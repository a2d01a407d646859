use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use jsvars_core::FailureKind;
use jsvars_engine::{FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings::default()).expect("client builds")
}

/// Serves one `200 OK` that promises 100 bytes, sends 10, then hangs up.
fn truncated_body_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request);
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nContent-Type: application/javascript\r\n\r\nvar a = 1;",
        );
        let _ = stream.flush();
    });
    format!("http://{addr}/truncated.js")
}

/// An address nothing listens on: bind an ephemeral port, then release it.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/app.js")
}

#[tokio::test]
async fn fetcher_returns_body_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("var a = 1;", "application/javascript; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/app.js", server.uri());
    let content = fetcher().fetch(&url).await.expect("fetch ok");

    assert_eq!(content.bytes, b"var a = 1;");
    assert!(content
        .content_type
        .unwrap()
        .starts_with("application/javascript"));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.js"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing.js", server.uri());
    let err = fetcher().fetch(&url).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::NonSuccessStatus(404));
    assert_eq!(err.message, "404 Not Found");
}

#[tokio::test]
async fn fetcher_reports_other_2xx_as_non_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty.js"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let url = format!("{}/empty.js", server.uri());
    let err = fetcher().fetch(&url).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::NonSuccessStatus(204));
    assert_eq!(err.message, "204 No Content");
}

#[tokio::test]
async fn fetcher_reports_truncated_body_as_body_read() {
    let url = truncated_body_url();
    let err = fetcher().fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::BodyRead);
}

#[tokio::test]
async fn fetcher_reports_refused_connection_as_transport() {
    let err = fetcher().fetch(&closed_port_url()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
}

#[tokio::test]
async fn fetcher_reports_malformed_url_as_transport() {
    let err = fetcher().fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
}

#[tokio::test]
async fn fetch_error_converts_into_failure_record() {
    let err = fetcher().fetch("not a url").await.unwrap_err();
    let message = err.message.clone();
    let record = err.into_record("not a url");

    assert_eq!(record.target, "not a url");
    assert_eq!(record.kind, FailureKind::Transport);
    assert_eq!(record.detail, message);
}
