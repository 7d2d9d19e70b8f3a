//! Integration tests for CORS and compression on the full router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use super::test_utils::{get, test_router, track_bytes, MockLibrary, TrackFixture};

#[tokio::test]
async fn test_cors_on_api_response() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let request = Request::builder()
        .uri("/api/browse/a")
        .header(header::ORIGIN, "http://player.example")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_on_error_responses() {
    let router = test_router(MockLibrary::failing(), TrackFixture::empty().store);

    for uri in ["/api/browse/a", "/api/track/bad.id.mp3", "/missing.css"] {
        let request = Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "http://player.example")
            .body(Body::empty())
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error() || response.status().is_server_error());
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*",
            "uri {uri}"
        );
    }
}

#[tokio::test]
async fn test_compressed_browse_keeps_cors() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    // Long enough path that the JSON body clears the compression size floor
    let uri = format!("/api/browse/{}", vec!["segment"; 32].join("/"));
    let request = Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "http://player.example")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_ENCODING).unwrap(),
        "gzip"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_track_keeps_accept_ranges_with_gzip() {
    let data = track_bytes();
    let fixture = TrackFixture::new(&[("abc123", &data)]);
    let router = test_router(MockLibrary::new(), fixture.store.clone());

    let request = Request::builder()
        .uri("/api/track/abc123.mp3")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert_eq!(
        response.headers().get(header::ACCEPT_RANGES).unwrap(),
        "bytes"
    );
}

#[tokio::test]
async fn test_preflight_on_api_route() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/track/abc123.mp3")
        .header(header::ORIGIN, "http://player.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "range")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

#[tokio::test]
async fn test_plain_get_has_no_content_encoding() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let response = router.oneshot(get("/api/browse/a/b")).await.unwrap();
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
}
