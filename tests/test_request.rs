use std::sync::mpsc;

use bytes::Bytes;
use courier::error::{Error, ProtocolError};
use courier::http::request::PendingRequest;

fn noop_request(method: &str, path: &str) -> PendingRequest {
    PendingRequest::new(method, path, Box::new(|_| {}), Box::new(|_| {}))
}

#[test]
fn test_wire_bytes_exact() {
    let request = noop_request("GET", "/index.html");

    assert_eq!(
        request.wire_bytes(),
        b"GET /index.html HTTP/1.0\r\nAccept: */*\r\nConnection: keep-alive\r\n\r\n"
    );
}

#[test]
fn test_wire_bytes_other_method() {
    let request = noop_request("HEAD", "/status");
    let text = String::from_utf8_lossy(request.wire_bytes()).into_owned();

    assert!(text.starts_with("HEAD /status HTTP/1.0\r\n"));
    assert!(text.contains("Accept: */*\r\n"));
    assert!(text.contains("Connection: keep-alive\r\n"));
    assert!(text.ends_with("\r\n\r\n"));
}

#[test]
fn test_accessors() {
    let request = noop_request("GET", "/api/users");

    assert_eq!(request.method(), "GET");
    assert_eq!(request.path(), "/api/users");
}

#[test]
fn test_complete_success_fires_only_success_callback() {
    let (tx, rx) = mpsc::channel();
    let err_tx = tx.clone();

    let request = PendingRequest::new(
        "GET",
        "/",
        Box::new(move |body: Bytes| {
            tx.send(Ok(body)).unwrap();
        }),
        Box::new(move |err: Error| {
            err_tx.send(Err(err)).unwrap();
        }),
    );

    request.complete(Ok(Bytes::from_static(b"hello")));

    let outcome = rx.recv().unwrap();
    assert_eq!(outcome.unwrap(), Bytes::from_static(b"hello"));

    // Both callbacks are gone once the request is consumed, so the channel
    // closes after the single delivery.
    assert!(rx.recv().is_err());
}

#[test]
fn test_complete_failure_fires_only_failure_callback() {
    let (tx, rx) = mpsc::channel();
    let err_tx = tx.clone();

    let request = PendingRequest::new(
        "GET",
        "/",
        Box::new(move |body: Bytes| {
            tx.send(Ok(body)).unwrap();
        }),
        Box::new(move |err: Error| {
            err_tx.send(Err(err)).unwrap();
        }),
    );

    request.complete(Err(Error::Protocol(ProtocolError::NonSuccessStatus(404))));

    let outcome = rx.recv().unwrap();
    assert!(matches!(
        outcome,
        Err(Error::Protocol(ProtocolError::NonSuccessStatus(404)))
    ));
    assert!(rx.recv().is_err());
}
