//! Eggplant - a personal music library server.
//!
//! This binary loads the library index, opens the file stores and starts the
//! HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eggplant::{
    config::Config,
    library::IndexLibrary,
    server::{serve_with, AppState, EmbeddedAssets, RouterConfig},
    store::DirectoryStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Library index: {}", config.library.display());
    info!("  Tracks: {}", config.tracks.display());
    info!("  Thumbnails: {}", config.thumbnails.display());

    let library = match IndexLibrary::from_path(&config.library) {
        Ok(library) => library,
        Err(e) => {
            error!("Failed to load library index: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (track_mime, thumbnail_mime) = match (config.track_mime(), config.thumbnail_mime()) {
        (Ok(track), Ok(thumbnail)) => (track, thumbnail),
        (Err(e), _) | (_, Err(e)) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracks = DirectoryStore::new(&config.tracks, track_mime);
    let thumbnails = DirectoryStore::new(&config.thumbnails, thumbnail_mime);

    let assets = match EmbeddedAssets::load() {
        Ok(assets) => assets,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::with_span(library, tracks, thumbnails, info_span!("server"));
    let router_config = RouterConfig::new().with_tracing(!config.no_tracing);
    let addr = config.bind_address();

    info!("Open http://{}/ in your browser", addr);

    if let Err(e) = serve_with(state, assets, router_config, &addr).await {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "eggplant=debug,tower_http=debug"
    } else {
        "eggplant=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
