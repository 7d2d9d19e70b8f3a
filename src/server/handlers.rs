//! HTTP request handlers for the library API.
//!
//! # Endpoints
//!
//! - `GET /api/browse/{*path}` - List a library location
//! - `GET /api/track/{id}` - Stream a track file

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info_span, Span};

use super::path::{decompose_path, TrackId};
use crate::library::Library;
use crate::store::FileStore;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state holding the collaborators.
///
/// Created once at startup and passed to all handlers via Axum's State
/// extractor. Everything inside is read-only.
pub struct AppState<L: Library, S: FileStore> {
    /// Library index used by the browse endpoint
    pub library: Arc<L>,

    /// Store holding the track files
    pub tracks: Arc<S>,

    /// Store holding the thumbnail images
    pub thumbnails: Arc<S>,

    /// Span that handler log events are recorded under
    pub span: Span,
}

impl<L: Library, S: FileStore> AppState<L, S> {
    /// Create a new application state with a default `http` span.
    pub fn new(library: L, tracks: S, thumbnails: S) -> Self {
        Self::with_span(library, tracks, thumbnails, info_span!("http"))
    }

    /// Create a new application state logging under the given span.
    pub fn with_span(library: L, tracks: S, thumbnails: S, span: Span) -> Self {
        Self {
            library: Arc::new(library),
            tracks: Arc::new(tracks),
            thumbnails: Arc::new(thumbnails),
            span,
        }
    }
}

impl<L: Library, S: FileStore> Clone for AppState<L, S> {
    fn clone(&self) -> Self {
        Self {
            library: Arc::clone(&self.library),
            tracks: Arc::clone(&self.tracks),
            thumbnails: Arc::clone(&self.thumbnails),
            span: self.span.clone(),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error body returned by the API routes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// An error surfaced to API clients.
///
/// Carries only public text. Collaborator errors are logged where they are
/// caught and replaced by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: &'static str,
}

impl ApiError {
    pub const fn new(status: StatusCode, error: &'static str, message: &'static str) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Generic 500 used when a collaborator fails.
    pub const fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::with_status(self.error, self.message, self.status);
        (self.status, Json(body)).into_response()
    }
}

/// Outcome of an API handler: a JSON payload or an [`ApiError`].
pub type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// Handlers
// =============================================================================

const BROWSE_PREFIX: &str = "/api/browse/";

/// Handle browse requests.
///
/// # Endpoint
///
/// `GET /api/browse/{*path}`
///
/// # Path Parameters
///
/// - `path`: Slash-separated library ids, outermost first
///
/// # Response
///
/// - `200 OK`: JSON listing produced by the library
/// - `500 Internal Server Error`: The library failed; details are only logged
///
/// Segments that do not decode to UTF-8 are passed on lossily, so every
/// request still reaches the library.
pub async fn browse_handler<L, S>(
    State(state): State<AppState<L, S>>,
    path: Result<Path<String>, PathRejection>,
    uri: Uri,
) -> ApiResult<L::Listing>
where
    L: Library + 'static,
    S: FileStore + 'static,
{
    match path {
        Ok(Path(path)) => browse(&state, &path).await,
        Err(rejection) => {
            debug!(parent: &state.span, error = %rejection, "Decoding browse path lossily");
            let raw = uri.path().strip_prefix(BROWSE_PREFIX).unwrap_or_default();
            let decoded = urlencoding::decode_binary(raw.as_bytes());
            browse(&state, &String::from_utf8_lossy(&decoded)).await
        }
    }
}

/// Handle browse requests for the library root (`/api/browse` and `/api/browse/`).
pub async fn browse_root_handler<L, S>(
    State(state): State<AppState<L, S>>,
) -> ApiResult<L::Listing>
where
    L: Library + 'static,
    S: FileStore + 'static,
{
    browse(&state, "").await
}

async fn browse<L, S>(state: &AppState<L, S>, raw: &str) -> ApiResult<L::Listing>
where
    L: Library,
    S: FileStore,
{
    let path = decompose_path(raw);
    debug!(parent: &state.span, path = %path, depth = path.len(), "Browse request");

    match state.library.browse(&path).await {
        Ok(listing) => Ok(Json(listing)),
        Err(err) => {
            error!(
                parent: &state.span,
                path = %path,
                error = %err,
                "Library browse failed"
            );
            Err(ApiError::internal())
        }
    }
}

/// Handle track requests.
///
/// # Endpoint
///
/// `GET /api/track/{id}`
///
/// # Path Parameters
///
/// - `id`: Track id, optionally followed by an extension (e.g. `abc123.flac`)
///
/// # Response
///
/// - `200 OK` / `206 Partial Content`: File bytes from the track store
/// - `400 Bad Request`: Id is not alphanumeric after dropping the extension
///   (empty body, the store is not consulted)
/// - `404 Not Found`: The store has no file for the id
///
/// # Headers
///
/// - `Accept-Ranges: bytes` on every response that reached the store
pub async fn track_handler<L, S>(
    State(state): State<AppState<L, S>>,
    id: Result<Path<String>, PathRejection>,
    request: Request,
) -> Response
where
    L: Library + 'static,
    S: FileStore + 'static,
{
    let Ok(Path(id)) = id else {
        debug!(parent: &state.span, "Rejected undecodable track id");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let track_id = match TrackId::parse(&id) {
        Ok(track_id) => track_id,
        Err(err) => {
            debug!(parent: &state.span, error = %err, "Rejected track request");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let mut response = state.tracks.serve_file(track_id.as_str(), request).await;
    response
        .headers_mut()
        .insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    response
}

// =============================================================================
// Tests
// =============================================================================
