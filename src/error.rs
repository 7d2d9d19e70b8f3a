use thiserror::Error;

/// Errors returned by a [`Library`](crate::library::Library) collaborator.
#[derive(Debug, Clone, Error)]
pub enum LibraryError {
    /// No directory exists at the requested browse path
    #[error("Directory not found: {0}")]
    NotFound(String),

    /// The library index could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// The library index is not valid JSON or has an unexpected shape
    #[error("Invalid library index: {0}")]
    Parse(String),
}

/// Errors that prevent the server from starting or keep it from running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The frontend asset bundle could not be initialized
    #[error("Asset bundle error: {0}")]
    Assets(String),

    /// The listener could not be bound to the requested address
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The listener failed while serving connections
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A track id taken from the URL is not a non-empty ASCII alphanumeric token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid track id: {raw:?}")]
pub struct InvalidTrackId {
    /// The raw path segment as received, extension included
    pub raw: String,
}
