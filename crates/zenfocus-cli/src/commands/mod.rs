pub mod config;
pub mod profile;
pub mod session;
pub mod timer;

use std::path::PathBuf;

use zenfocus_core::GamificationEngine;

/// Engine over `--profile` if given, else the configured location.
pub fn open_engine(profile: Option<PathBuf>) -> GamificationEngine {
    let engine = match profile {
        Some(path) => GamificationEngine::open(path),
        None => GamificationEngine::open_default(),
    };
    tracing::debug!(location = %engine.location().display(), "profile opened");
    engine
}
