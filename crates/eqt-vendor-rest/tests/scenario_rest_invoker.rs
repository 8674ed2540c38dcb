//! RestInvoker against a local mock vendor.

use std::time::Duration;

use eqt_orders::{HttpMethod, TransportError, VendorCall, VendorInvoker};
use eqt_vendor_rest::RestInvoker;
use httpmock::prelude::*;
use serde_json::json;

fn call(method: HttpMethod, url: String, body: serde_json::Value) -> VendorCall {
    VendorCall {
        method,
        url,
        body: serde_json::to_vec(&body).unwrap(),
        headers: vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("x-api-key".to_string(), "k-test".to_string()),
        ],
        timeout: Duration::from_millis(700),
    }
}

#[tokio::test]
async fn posts_body_and_headers_and_returns_raw_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/order/entry")
                .header("x-api-key", "k-test")
                .json_body(json!({"entity_id": "U1", "source": "API"}));
            then.status(200)
                .body(r#"{"status":"success","data":{"order_no":"1001"}}"#);
        })
        .await;

    let reply = RestInvoker::new()
        .invoke(call(
            HttpMethod::Post,
            server.url("/order/entry"),
            json!({"entity_id": "U1", "source": "API"}),
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, 200);
    assert!(String::from_utf8(reply.body).unwrap().contains("1001"));
}

#[tokio::test]
async fn non_success_status_is_returned_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/order/modify");
            then.status(503).body("unavailable");
        })
        .await;

    let reply = RestInvoker::new()
        .invoke(call(HttpMethod::Put, server.url("/order/modify"), json!({})))
        .await
        .unwrap();

    assert_eq!(reply.status, 503);
    assert_eq!(reply.body, b"unavailable".to_vec());
}

#[tokio::test]
async fn slow_vendor_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/position/convert");
            then.status(200).delay(Duration::from_millis(1500)).body("{}");
        })
        .await;

    let mut c = call(HttpMethod::Post, server.url("/position/convert"), json!({}));
    c.timeout = Duration::from_millis(100);

    let err = RestInvoker::new().invoke(c).await.unwrap_err();
    assert_eq!(err, TransportError::Timeout);
}

#[tokio::test]
async fn refused_connection_is_a_connect_error() {
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };

    let err = RestInvoker::new()
        .invoke(call(
            HttpMethod::Get,
            format!("http://127.0.0.1:{port}/order/book"),
            json!({}),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connect(_)), "got {err:?}");
}
