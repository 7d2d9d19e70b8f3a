//! # Eggplant
//!
//! HTTP front-end for a personal music library server.
//!
//! The server exposes two API routes and a frontend:
//!
//! - **Browsing**: `GET /api/browse/{*path}` lists a library location addressed
//!   by a slash-separated path of opaque ids
//! - **Streaming**: `GET /api/track/{id}` streams a track file with byte-range
//!   support
//! - **Frontend**: every other path is served from the bundled web UI
//!
//! Every response carries permissive CORS headers and is gzip-compressed when
//! the client accepts it (range-capable track responses excepted).
//!
//! ## Architecture
//!
//! - [`library`] - Library collaborator trait and the JSON index implementation
//! - [`store`] - File store collaborator for tracks and thumbnails
//! - [`server`] - Axum router, handlers, middleware and static assets
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use eggplant::{DirectoryStore, IndexLibrary};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let library = IndexLibrary::from_path("library.json")?;
//!     let tracks = DirectoryStore::tracks("data/tracks");
//!     let thumbnails = DirectoryStore::thumbnails("data/thumbnails");
//!
//!     eggplant::serve(library, tracks, thumbnails, "127.0.0.1:8118").await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod library;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{InvalidTrackId, LibraryError, ServerError};
pub use library::{BrowsePath, Directory, Id, IndexLibrary, Library};
pub use server::{
    create_router, serve, serve_with, ApiError, ApiResult, AppState, AssetProvider,
    EmbeddedAssets, MemoryAssets, RouterConfig, TrackId,
};
pub use store::{DirectoryStore, FileStore};
