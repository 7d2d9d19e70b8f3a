//! File store collaborator.
//!
//! Tracks and thumbnails live as flat files named by id. The store owns the
//! byte delivery: conditional requests, `Range` handling (`206` / `416`) and
//! the `404` for ids that have no file.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mime_guess::Mime;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

/// Default content type for files in the track store.
pub const DEFAULT_TRACK_CONTENT_TYPE: &str = "audio/mpeg";

/// Default content type for files in the thumbnail store.
pub const DEFAULT_THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

fn default_mime(value: &str) -> Mime {
    value
        .parse()
        .unwrap_or(mime_guess::mime::APPLICATION_OCTET_STREAM)
}

// =============================================================================
// FileStore Trait
// =============================================================================

/// Serves stored files over HTTP.
///
/// Implementations are shared read-only across all concurrent requests.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Respond to `request` with the content of the file named `id`.
    ///
    /// Range and conditional headers on `request` are honored by the store.
    async fn serve_file(&self, id: &str, request: Request) -> Response;
}

// =============================================================================
// DirectoryStore
// =============================================================================

/// A [`FileStore`] backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    content_type: Mime,
}

impl DirectoryStore {
    /// Create a store over `root` serving files as `content_type`.
    pub fn new(root: impl Into<PathBuf>, content_type: Mime) -> Self {
        Self {
            root: root.into(),
            content_type,
        }
    }

    /// Create a track store with the default audio content type.
    pub fn tracks(root: impl Into<PathBuf>) -> Self {
        Self::new(root, default_mime(DEFAULT_TRACK_CONTENT_TYPE))
    }

    /// Create a thumbnail store with the default image content type.
    pub fn thumbnails(root: impl Into<PathBuf>) -> Self {
        Self::new(root, default_mime(DEFAULT_THUMBNAIL_CONTENT_TYPE))
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// Map an id onto a file inside the store root.
    ///
    /// Returns `None` unless the id is exactly one normal path component.
    pub fn file_path(&self, id: &str) -> Option<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }
}

#[async_trait]
impl FileStore for DirectoryStore {
    async fn serve_file(&self, id: &str, request: Request) -> Response {
        let Some(path) = self.file_path(id) else {
            debug!(id = id, "Rejected file id outside store root");
            return StatusCode::NOT_FOUND.into_response();
        };

        debug!(id = id, path = %path.display(), "Serving file");

        ServeFile::new_with_mime(path, &self.content_type)
            .oneshot(request)
            .await
            .into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================
