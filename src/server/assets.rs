//! Static frontend assets.
//!
//! Any request no API route matches is answered from an [`AssetProvider`]
//! with plain file-server semantics: `200` with the file, or a text `404`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use rust_embed::RustEmbed;
use tracing::debug;

use crate::error::ServerError;

/// File served for `/` and any path ending in `/`.
pub const INDEX_FILE: &str = "index.html";

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct FrontendBundle;

// =============================================================================
// AssetProvider Trait
// =============================================================================

/// A read-only set of files addressed by relative path (`app/main.js`).
pub trait AssetProvider: Send + Sync + 'static {
    fn get(&self, path: &str) -> Option<Bytes>;

    /// Strong validator for the file at `path`, already quoted.
    ///
    /// Providers without content hashes return `None` and their files are
    /// always sent in full.
    fn etag(&self, _path: &str) -> Option<String> {
        None
    }
}

/// The frontend bundle compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssets {
    _private: (),
}

impl EmbeddedAssets {
    /// Check the bundle and return a provider for it.
    ///
    /// Fails if the bundle has no `index.html`.
    pub fn load() -> Result<Self, ServerError> {
        if FrontendBundle::get(INDEX_FILE).is_none() {
            return Err(ServerError::Assets(format!(
                "frontend bundle is missing {}",
                INDEX_FILE
            )));
        }
        Ok(Self { _private: () })
    }
}

impl AssetProvider for EmbeddedAssets {
    fn get(&self, path: &str) -> Option<Bytes> {
        FrontendBundle::get(path).map(|file| match file.data {
            Cow::Borrowed(data) => Bytes::from_static(data),
            Cow::Owned(data) => Bytes::from(data),
        })
    }

    fn etag(&self, path: &str) -> Option<String> {
        let file = FrontendBundle::get(path)?;
        let hash: String = file
            .metadata
            .sha256_hash()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Some(format!("\"{}\"", hash))
    }
}

/// Assets held in a map, for callers that build their frontend at runtime.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Bytes>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.files.insert(path.into(), data.into());
        self
    }
}

impl AssetProvider for MemoryAssets {
    fn get(&self, path: &str) -> Option<Bytes> {
        self.files.get(path).cloned()
    }
}

/// Shared handle to the provider, used as the fallback's state.
#[derive(Clone)]
pub struct StaticAssets(Arc<dyn AssetProvider>);

impl StaticAssets {
    pub fn new(provider: impl AssetProvider) -> Self {
        Self(Arc::new(provider))
    }

    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.0.get(path)
    }

    pub fn etag(&self, path: &str) -> Option<String> {
        self.0.etag(path)
    }
}

// =============================================================================
// Fallback Handler
// =============================================================================

/// Map a request path onto an asset path.
///
/// Returns `None` for paths that are not valid UTF-8 after decoding or that
/// contain a `..` segment.
pub fn asset_path(uri_path: &str) -> Option<String> {
    let decoded = urlencoding::decode(uri_path).ok()?;
    let relative = decoded.trim_start_matches('/');

    if relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    if relative.is_empty() || relative.ends_with('/') {
        Some(format!("{}{}", relative, INDEX_FILE))
    } else {
        Some(relative.to_string())
    }
}

fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|tag| tag.trim().trim_start_matches("W/"))
        .any(|tag| tag == "*" || tag == etag)
}

/// Serve a frontend asset.
///
/// # Response
///
/// - `200 OK`: File content with a `Content-Type` guessed from the extension
///   and an `ETag` when the provider has one
/// - `304 Not Modified`: `If-None-Match` matches the file's `ETag`
/// - `404 Not Found`: Plain text body
pub async fn static_handler(
    State(assets): State<StaticAssets>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let found = asset_path(uri.path()).and_then(|path| assets.get(&path).map(|data| (path, data)));

    match found {
        Some((path, data)) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            let Some(etag) = assets.etag(&path) else {
                return ([(header::CONTENT_TYPE, mime.to_string())], data).into_response();
            };

            if if_none_match(&headers, &etag) {
                return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
            }

            (
                [(header::CONTENT_TYPE, mime.to_string()), (header::ETAG, etag)],
                data,
            )
                .into_response()
        }
        None => {
            debug!(path = uri.path(), "Asset not found");
            (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
