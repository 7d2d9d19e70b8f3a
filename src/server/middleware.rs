//! Cross-cutting request wrappers.
//!
//! The stack is an ordered list of [`Interceptor`]s, outermost first, fixed
//! when the router is built:
//!
//! ```text
//! request ──▶ Trace ──▶ Cors ──▶ Compression ──▶ Router
//! ```
//!
//! Compression sits inside CORS so the CORS headers are added to the already
//! compressed response.

use axum::Router;
use http::{Extensions, HeaderMap, StatusCode, Version};
use tower_http::compression::predicate::{DefaultPredicate, Predicate};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// One wrapper in the middleware stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interceptor {
    /// Request/response tracing via `tower_http::trace`
    Trace,

    /// Permissive CORS: any origin, method and header
    Cors,

    /// Response body compression negotiated through `Accept-Encoding`
    Compression,
}

impl Interceptor {
    /// Wrap `router` in this interceptor.
    pub fn wrap(self, router: Router) -> Router {
        match self {
            Interceptor::Trace => router.layer(TraceLayer::new_for_http()),
            Interceptor::Cors => router.layer(CorsLayer::permissive()),
            Interceptor::Compression => router.layer(
                CompressionLayer::new()
                    .compress_when(DefaultPredicate::new().and(not_range_capable)),
            ),
        }
    }
}

/// Responses advertising byte ranges are sent as-is, otherwise a client's
/// range offsets would point into the compressed stream.
fn not_range_capable(
    _status: StatusCode,
    _version: Version,
    headers: &HeaderMap,
    _extensions: &Extensions,
) -> bool {
    !headers.contains_key(http::header::ACCEPT_RANGES)
}

/// Ordered, immutable list of interceptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddlewareStack {
    interceptors: Vec<Interceptor>,
}

impl MiddlewareStack {
    /// The standard stack: optional tracing, then CORS, then compression.
    pub fn new(enable_tracing: bool) -> Self {
        let mut interceptors = Vec::with_capacity(3);
        if enable_tracing {
            interceptors.push(Interceptor::Trace);
        }
        interceptors.push(Interceptor::Cors);
        interceptors.push(Interceptor::Compression);
        Self { interceptors }
    }

    /// Interceptors, outermost first.
    pub fn interceptors(&self) -> &[Interceptor] {
        &self.interceptors
    }

    /// Wrap `router` so the first interceptor ends up outermost.
    pub fn apply(&self, router: Router) -> Router {
        self.interceptors
            .iter()
            .rev()
            .fold(router, |router, interceptor| interceptor.wrap(router))
    }
}

impl Default for MiddlewareStack {
    fn default() -> Self {
        Self::new(true)
    }
}
