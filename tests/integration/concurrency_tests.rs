//! Concurrent requests against one router and shared collaborators.

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use tower::ServiceExt;

use super::test_utils::{body_bytes, get, test_router, track_bytes, MockLibrary, TrackFixture};

const REQUESTS: usize = 64;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_browse_and_track_requests() {
    let data = track_bytes();
    let fixture = TrackFixture::new(&[("abc123", &data)]);
    let store_calls = fixture.store.calls();
    let library = MockLibrary::new();
    let library_calls = library.calls();
    let router = test_router(library, fixture.store.clone());

    let mut handles = Vec::with_capacity(REQUESTS);
    for i in 0..REQUESTS {
        let router = router.clone();
        let data = data.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let uri = format!("/api/browse/level{}/item{}", i, i);
                let response = router.oneshot(get(&uri)).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);

                // Each response must echo its own path, never another request's
                let body = body_bytes(response).await;
                let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
                assert_eq!(json["ids"][0], format!("level{}", i));
                assert_eq!(json["ids"][1], format!("item{}", i));
            } else {
                let response = router.oneshot(get("/api/track/abc123.mp3")).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                let body = body_bytes(response).await;
                assert_eq!(body.as_ref(), data.as_slice());
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(library_calls.load(Ordering::SeqCst), REQUESTS / 2);
    assert_eq!(store_calls.load(Ordering::SeqCst), REQUESTS / 2);
}
