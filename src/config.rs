//! Configuration management for Eggplant.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `EGGPLANT_` prefix:
//!
//! - `EGGPLANT_HOST` - Server bind address (default: 0.0.0.0)
//! - `EGGPLANT_PORT` - Server port (default: 8118)
//! - `EGGPLANT_LIBRARY` - Path to the JSON library index (required)
//! - `EGGPLANT_TRACKS` - Directory holding track files (required)
//! - `EGGPLANT_THUMBNAILS` - Directory holding thumbnail files (required)
//! - `EGGPLANT_TRACK_CONTENT_TYPE` - Content type of track files (default: audio/mpeg)
//! - `EGGPLANT_THUMBNAIL_CONTENT_TYPE` - Content type of thumbnails (default: image/jpeg)

use std::path::PathBuf;

use clap::Parser;
use mime_guess::Mime;

use crate::store::{DEFAULT_THUMBNAIL_CONTENT_TYPE, DEFAULT_TRACK_CONTENT_TYPE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8118;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Eggplant - a personal music library server.
///
/// Serves a browsable library index and streams track files with range
/// request support, alongside the bundled web UI.
#[derive(Parser, Debug, Clone)]
#[command(name = "eggplant")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "EGGPLANT_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "EGGPLANT_PORT")]
    pub port: u16,

    // =========================================================================
    // Library Configuration
    // =========================================================================
    /// Path to the JSON library index.
    #[arg(long, env = "EGGPLANT_LIBRARY")]
    pub library: PathBuf,

    /// Directory holding the track files, named by track id.
    #[arg(long, env = "EGGPLANT_TRACKS")]
    pub tracks: PathBuf,

    /// Directory holding the thumbnail files, named by thumbnail id.
    #[arg(long, env = "EGGPLANT_THUMBNAILS")]
    pub thumbnails: PathBuf,

    /// Content type sent for track files.
    #[arg(long, default_value = DEFAULT_TRACK_CONTENT_TYPE, env = "EGGPLANT_TRACK_CONTENT_TYPE")]
    pub track_content_type: String,

    /// Content type sent for thumbnail files.
    #[arg(long, default_value = DEFAULT_THUMBNAIL_CONTENT_TYPE, env = "EGGPLANT_THUMBNAIL_CONTENT_TYPE")]
    pub thumbnail_content_type: String,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host is required. Set --host or EGGPLANT_HOST".to_string());
        }

        if self.library.as_os_str().is_empty() {
            return Err(
                "Library index path is required. Set --library or EGGPLANT_LIBRARY".to_string(),
            );
        }
        if self.tracks.as_os_str().is_empty() {
            return Err("Track directory is required. Set --tracks or EGGPLANT_TRACKS".to_string());
        }
        if self.thumbnails.as_os_str().is_empty() {
            return Err(
                "Thumbnail directory is required. Set --thumbnails or EGGPLANT_THUMBNAILS"
                    .to_string(),
            );
        }

        self.track_mime()?;
        self.thumbnail_mime()?;

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed track content type.
    pub fn track_mime(&self) -> Result<Mime, String> {
        parse_mime("track_content_type", &self.track_content_type)
    }

    /// Parsed thumbnail content type.
    pub fn thumbnail_mime(&self) -> Result<Mime, String> {
        parse_mime("thumbnail_content_type", &self.thumbnail_content_type)
    }
}

fn parse_mime(name: &str, value: &str) -> Result<Mime, String> {
    value
        .parse()
        .map_err(|_| format!("{} is not a valid content type: {:?}", name, value))
}

// =============================================================================
// Tests
// =============================================================================
