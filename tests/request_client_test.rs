//! Request client over a real socket with the reqwest transport.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::sync::Arc;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::time::{
    Duration,
    Instant,
};

use googletest::prelude::*;
use portfolio_core::http::{
    GENERIC_ERROR,
    ReqwestTransport,
    RequestClient,
    RequestOptions,
    RetryPolicy,
};
use serde_json::{
    Value,
    json,
};
use tokio::io::{
    AsyncReadExt,
    AsyncWriteExt,
};
use tokio::net::{
    TcpListener,
    TcpStream,
};
use tokio::task::JoinHandle;

fn client(policy: RetryPolicy) -> RequestClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    RequestClient::with_transport(ReqwestTransport::from_client(http), policy)
}

/// Reads one request: the head plus `content-length` bytes of body.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map_or(0, |v| v.trim().parse::<usize>().unwrap());
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

/// Serves a single response and hands back the raw request it received.
async fn respond_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\n\
             content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        request
    });

    (url, server)
}

#[tokio::test]
async fn test_post_sends_json_body_and_decodes_response() {
    let (url, server) = respond_once("200 OK", r#"{"ok":true}"#).await;
    let client = client(RetryPolicy { retries: 0, ..RetryPolicy::default() });

    let outcome = client
        .post::<_, Value>(&format!("{url}/submit"), &json!({"a": 1}), RequestOptions::new())
        .await;

    assert!(outcome.is_success());
    assert_that!(outcome.data(), some(eq(&json!({"ok": true}))));

    let request = server.await.unwrap();
    assert_that!(request, starts_with("POST /submit HTTP/1.1\r\n"));
    assert_that!(request.to_lowercase(), contains_substring("content-type: application/json"));
    assert_that!(request, ends_with(r#"{"a":1}"#));
}

#[tokio::test]
async fn test_error_status_reads_body_and_returns_generic_error() {
    let (url, server) = respond_once("503 Service Unavailable", r#"{"error":"down"}"#).await;
    let client = client(RetryPolicy { retries: 0, ..RetryPolicy::default() });

    let outcome = client.get::<Value>(&format!("{url}/status"), RequestOptions::new()).await;

    assert!(!outcome.is_success());
    assert_that!(outcome.data(), none());
    assert_that!(outcome.error(), some(eq(GENERIC_ERROR)));
    assert_that!(server.await.unwrap(), starts_with("GET /status HTTP/1.1\r\n"));
}

#[tokio::test]
async fn test_silent_server_times_out_every_attempt() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/slow", listener.local_addr().unwrap());
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&accepted);
    let server = tokio::spawn(async move {
        // Connections stay open and unanswered.
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            open.push(stream);
        }
    });

    let policy = RetryPolicy {
        timeout: Duration::from_millis(200),
        retries: 1,
        retry_delay: Duration::from_millis(100),
    };
    let client = client(policy);
    let started = Instant::now();

    let outcome = client.get::<Value>(&url, RequestOptions::new()).await;

    assert_that!(outcome.error(), some(eq(GENERIC_ERROR)));
    assert_that!(outcome.data(), none());
    // two timed-out attempts plus one backoff
    assert_that!(started.elapsed(), ge(Duration::from_millis(500)));
    assert_that!(accepted.load(Ordering::SeqCst), eq(2));
    server.abort();
}
