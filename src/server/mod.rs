//! HTTP server layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Middleware (outer → inner)                  │
//! │                  Trace  →  Cors  →  Compression                 │
//! │                                                                 │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌───────────────┐  │
//! │  │ /api/browse/*    │  │ /api/track/{id}  │  │   fallback    │  │
//! │  │ decompose_path   │  │ TrackId::parse   │  │ static assets │  │
//! │  │      ↓           │  │      ↓           │  │               │  │
//! │  │   Library        │  │   FileStore      │  │               │  │
//! │  └──────────────────┘  └──────────────────┘  └───────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod assets;
pub mod handlers;
pub mod middleware;
pub mod path;
pub mod routes;

pub use assets::{
    asset_path, static_handler, AssetProvider, EmbeddedAssets, MemoryAssets, StaticAssets,
};
pub use handlers::{
    browse_handler, browse_root_handler, track_handler, ApiError, ApiResult, AppState,
    ErrorResponse,
};
pub use middleware::{Interceptor, MiddlewareStack};
pub use path::{decompose_path, is_valid_id, trim_extension, TrackId};
pub use routes::{create_router, serve, serve_with, RouterConfig};
