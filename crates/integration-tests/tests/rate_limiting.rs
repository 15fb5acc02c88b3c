//! Rate limiting of the session-mutating routes.

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use easemyform_integration_tests::{TestApp, test_config};

/// Burst allowed before the limiter rejects.
const BURST: usize = 5;

fn limited_app(trust_proxy_headers: bool) -> TestApp {
    let mut config = test_config();
    config.rate_limit_enabled = true;
    config.trust_proxy_headers = trust_proxy_headers;
    TestApp::with_config(config)
}

fn peer(port: u16) -> SocketAddr {
    SocketAddr::from(([192, 0, 2, 10], port))
}

fn verify_request(forwarded_for: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login/verify")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-forwarded-for", forwarded_for)
        .body(Body::from("code=123456"))
        .unwrap()
}

#[tokio::test]
async fn test_verify_is_limited_past_burst() {
    let app = limited_app(false);

    for _ in 0..BURST {
        let response = app
            .post_form_from(peer(40_000), "/login/verify", "code=123456", None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let limited = app
        .post_form_from(peer(40_000), "/login/verify", "code=123456", None)
        .await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);

    // Pages are not behind the limiter
    let home = app
        .send_from(peer(40_000), Request::builder().uri("/").body(Body::empty()).unwrap())
        .await;
    assert_eq!(home.status, StatusCode::OK);

    // Other clients keep their own budget
    let other = app
        .post_form_from(
            SocketAddr::from(([192, 0, 2, 11], 40_000)),
            "/login/verify",
            "code=123456",
            None,
        )
        .await;
    assert_eq!(other.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forwarded_for_is_ignored_without_trusted_proxy() {
    let app = limited_app(false);

    let mut statuses = Vec::new();
    for i in 0..=BURST {
        let spoofed = format!("203.0.113.{i}");
        let response = app.send_from(peer(40_001), verify_request(&spoofed)).await;
        statuses.push(response.status);
    }

    assert!(statuses[..BURST].iter().all(|s| *s == StatusCode::BAD_REQUEST));
    assert_eq!(statuses[BURST], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_trusted_proxy_headers_key_each_client() {
    let app = limited_app(true);

    for i in 0..=BURST * 2 {
        let client = format!("203.0.113.{i}");
        let response = app.send_from(peer(40_002), verify_request(&client)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "client {client}");
    }
}
