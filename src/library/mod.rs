//! Library collaborator.
//!
//! The HTTP layer never interprets browse identifiers; it hands a
//! [`BrowsePath`] to a [`Library`] and serializes whatever listing comes back.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              BrowseHandler              │
//! └────────────────────┬────────────────────┘
//!                      │  BrowsePath
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             Library Trait               │
//! │   (maps ids onto a library location)    │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             IndexLibrary                │
//! │   (in-memory tree from a JSON index)    │
//! └─────────────────────────────────────────┘
//! ```

mod index;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

pub use index::{Crumb, Directory, DirectoryNode, DirectorySummary, IndexLibrary, Track};

// =============================================================================
// Identifiers
// =============================================================================

/// An opaque token naming one level of library nesting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered sequence of [`Id`]s describing a library location.
///
/// The empty path is the library root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowsePath(Vec<Id>);

impl BrowsePath {
    /// The library root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn ids(&self) -> &[Id] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Id>> for BrowsePath {
    fn from(ids: Vec<Id>) -> Self {
        Self(ids)
    }
}

impl fmt::Display for BrowsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(id.as_str())?;
        }
        Ok(())
    }
}

// =============================================================================
// Library Trait
// =============================================================================

/// A browsable content library.
///
/// Implementations are shared read-only across all concurrent requests.
#[async_trait]
pub trait Library: Send + Sync {
    /// The listing returned for a location. Serialized as the JSON success body.
    type Listing: Serialize + Send;

    /// Resolve `path` to a library location and list its contents.
    ///
    /// Semantic validation of the ids is the implementation's job.
    async fn browse(&self, path: &BrowsePath) -> Result<Self::Listing, LibraryError>;
}
