//! URL path shaping for the API routes.
//!
//! - [`decompose_path`] turns the browse wildcard into a [`BrowsePath`]
//! - [`TrackId::parse`] turns the track segment into a validated id
//!
//! Neither function looks at what the ids mean. Browse ids are passed to the
//! library untouched; track ids only have to be plain alphanumeric tokens.

use std::fmt;

use crate::error::InvalidTrackId;
use crate::library::{BrowsePath, Id};

const SEPARATOR: char = '/';
const EXTENSION_SEPARATOR: char = '.';

/// Split a raw URL path into library ids.
///
/// Leading and trailing separators are trimmed, the remainder is split on
/// `/`. Segments are kept verbatim, so `a//b` yields an empty id between `a`
/// and `b`. A path made only of separators yields the root.
pub fn decompose_path(raw: &str) -> BrowsePath {
    let trimmed = raw.trim_matches(SEPARATOR);
    if trimmed.is_empty() {
        return BrowsePath::root();
    }

    trimmed
        .split(SEPARATOR)
        .map(Id::from)
        .collect::<Vec<_>>()
        .into()
}

/// Drop everything from the last `.` onwards.
pub fn trim_extension(segment: &str) -> &str {
    match segment.rfind(EXTENSION_SEPARATOR) {
        Some(index) => &segment[..index],
        None => segment,
    }
}

/// Whether `id` is one or more ASCII letters or digits.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A validated, extension-stripped track identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    /// Strip one trailing extension from `segment` and validate the rest.
    pub fn parse(segment: &str) -> Result<Self, InvalidTrackId> {
        let id = trim_extension(segment);
        if !is_valid_id(id) {
            return Err(InvalidTrackId {
                raw: segment.to_string(),
            });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
