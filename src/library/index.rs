//! Index-backed library.
//!
//! The index is a JSON tree written by the library scanner:
//!
//! ```json
//! {
//!   "title": "Library",
//!   "directories": [
//!     {
//!       "id": "a1b2",
//!       "title": "Some Album",
//!       "thumbnail": "c3d4",
//!       "tracks": [{ "id": "e5f6", "title": "Intro", "duration": 93.4 }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BrowsePath, Id, Library};
use crate::error::LibraryError;

// =============================================================================
// Index Types
// =============================================================================

/// One directory in the library index.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryNode {
    /// Ignored for the root node
    #[serde(default = "root_id")]
    pub id: Id,

    pub title: String,

    /// Id of the thumbnail in the thumbnail store
    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub directories: Vec<DirectoryNode>,

    #[serde(default)]
    pub tracks: Vec<Track>,
}

fn root_id() -> Id {
    Id::new("")
}

impl DirectoryNode {
    fn child(&self, id: &Id) -> Option<&DirectoryNode> {
        self.directories.iter().find(|d| &d.id == id)
    }

    fn summary(&self) -> DirectorySummary {
        DirectorySummary {
            id: self.id.clone(),
            title: self.title.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }
}

/// A playable track. The id names a file in the track store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,

    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

// =============================================================================
// Listing Types
// =============================================================================

/// Listing of one library location, returned by [`IndexLibrary::browse`].
#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    pub title: String,

    /// Breadcrumb from the first level below the root down to the parent of
    /// this directory
    pub parents: Vec<Crumb>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    pub directories: Vec<DirectorySummary>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crumb {
    pub id: Id,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorySummary {
    pub id: Id,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

// =============================================================================
// IndexLibrary
// =============================================================================

/// A [`Library`] held entirely in memory.
///
/// Ids are matched against the tree and never mapped onto filesystem paths.
#[derive(Debug, Clone)]
pub struct IndexLibrary {
    root: DirectoryNode,
}

impl IndexLibrary {
    pub fn new(root: DirectoryNode) -> Self {
        Self { root }
    }

    /// Load the index from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| LibraryError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_slice(&data)
    }

    /// Parse the index from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, LibraryError> {
        let root: DirectoryNode =
            serde_json::from_slice(data).map_err(|e| LibraryError::Parse(e.to_string()))?;
        Ok(Self::new(root))
    }

    fn resolve(&self, path: &BrowsePath) -> Result<(&DirectoryNode, Vec<Crumb>), LibraryError> {
        let mut node = &self.root;
        let mut parents = Vec::with_capacity(path.len());

        for (depth, id) in path.ids().iter().enumerate() {
            let child = node
                .child(id)
                .ok_or_else(|| LibraryError::NotFound(path.to_string()))?;
            if depth > 0 {
                parents.push(Crumb {
                    id: node.id.clone(),
                    title: node.title.clone(),
                });
            }
            node = child;
        }

        Ok((node, parents))
    }
}

#[async_trait]
impl Library for IndexLibrary {
    type Listing = Directory;

    async fn browse(&self, path: &BrowsePath) -> Result<Directory, LibraryError> {
        let (node, parents) = self.resolve(path)?;
        debug!(
            path = %path,
            directories = node.directories.len(),
            tracks = node.tracks.len(),
            "Resolved library location"
        );

        Ok(Directory {
            title: node.title.clone(),
            parents,
            thumbnail: node.thumbnail.clone(),
            directories: node.directories.iter().map(DirectoryNode::summary).collect(),
            tracks: node.tracks.clone(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
