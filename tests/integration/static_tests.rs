//! Integration tests for the frontend fallback.
//!
//! Tests verify:
//! - Unmatched paths are served from the asset provider
//! - Missing assets are a plain 404, not the JSON error body

use axum::http::{header, StatusCode};
use tower::ServiceExt;

use super::test_utils::{
    body_bytes, get, test_router, MockLibrary, TrackFixture, APP_INDEX_HTML, INDEX_HTML,
};

#[tokio::test]
async fn test_asset_served_by_fallback() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let response = router.oneshot(get("/app/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html"
    );

    let body = body_bytes(response).await;
    assert_eq!(body.as_ref(), APP_INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn test_root_serves_index() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let response = router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), INDEX_HTML.as_bytes());

    let response = router.oneshot(get("/app/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), APP_INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn test_javascript_content_type() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let response = router.oneshot(get("/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("javascript"));
}

#[tokio::test]
async fn test_missing_asset_is_plain_404() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let response = router.oneshot(get("/missing/page.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = body_bytes(response).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&body).is_err());
}

#[tokio::test]
async fn test_unknown_api_path_falls_back_to_assets() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    // No API route matches, so this is a file-server 404
    let response = router.oneshot(get("/api/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_parent_segments_not_served() {
    let router = test_router(MockLibrary::new(), TrackFixture::empty().store);

    let response = router.oneshot(get("/app/%2E%2E/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
