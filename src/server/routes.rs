//! Router configuration and the server entry point.
//!
//! # Route Structure
//!
//! ```text
//! /api/browse/{*path}    - Browse the library (JSON)
//! /api/track/{id}        - Stream a track (range requests)
//! everything else       - Frontend assets
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eggplant::library::IndexLibrary;
//! use eggplant::store::DirectoryStore;
//!
//! let library = IndexLibrary::from_path("library.json")?;
//! let tracks = DirectoryStore::tracks("data/tracks");
//! let thumbnails = DirectoryStore::thumbnails("data/thumbnails");
//!
//! eggplant::server::serve(library, tracks, thumbnails, "127.0.0.1:8118").await?;
//! ```

use axum::{routing::get, Router};
use tracing::info;

use super::assets::{static_handler, AssetProvider, EmbeddedAssets, StaticAssets};
use super::handlers::{browse_handler, browse_root_handler, track_handler, AppState};
use super::middleware::MiddlewareStack;
use crate::error::ServerError;
use crate::library::Library;
use crate::store::FileStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a configuration with tracing enabled.
    pub fn new() -> Self {
        Self {
            enable_tracing: true,
        }
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// The middleware stack this configuration produces.
    pub fn middleware(&self) -> MiddlewareStack {
        MiddlewareStack::new(self.enable_tracing)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - API routes (browse and track)
/// - A fallback serving `assets`
/// - The middleware stack from `config`
pub fn create_router<L, S>(
    state: AppState<L, S>,
    assets: impl AssetProvider,
    config: RouterConfig,
) -> Router
where
    L: Library + 'static,
    S: FileStore + 'static,
{
    // The wildcard needs a non-empty remainder, so the root gets its own routes
    let api: Router = Router::new()
        .route("/api/browse", get(browse_root_handler::<L, S>))
        .route("/api/browse/", get(browse_root_handler::<L, S>))
        .route("/api/browse/{*path}", get(browse_handler::<L, S>))
        .route("/api/track/{id}", get(track_handler::<L, S>))
        .with_state(state);

    let frontend: Router = Router::new()
        .fallback(static_handler)
        .with_state(StaticAssets::new(assets));

    config.middleware().apply(api.fallback_service(frontend))
}

// =============================================================================
// Serve
// =============================================================================

/// Start the server with the embedded frontend and default configuration.
///
/// Blocks until the listener fails and returns that failure.
pub async fn serve<L, S>(
    library: L,
    tracks: S,
    thumbnails: S,
    address: &str,
) -> Result<(), ServerError>
where
    L: Library + 'static,
    S: FileStore + 'static,
{
    let assets = EmbeddedAssets::load()?;
    serve_with(
        AppState::new(library, tracks, thumbnails),
        assets,
        RouterConfig::default(),
        address,
    )
    .await
}

/// Start the server with explicit state, assets and router configuration.
pub async fn serve_with<L, S>(
    state: AppState<L, S>,
    assets: impl AssetProvider,
    config: RouterConfig,
    address: &str,
) -> Result<(), ServerError>
where
    L: Library + 'static,
    S: FileStore + 'static,
{
    let router = create_router(state, assets, config);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })?;

    info!(address = address, "Starting listening");

    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
