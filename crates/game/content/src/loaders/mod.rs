//! Content loaders for reading battle data from files.
//!
//! Loaders convert RON/TOML/JSON files into `battle-core` values. Every loader
//! reports failures as [`LoadResult`] errors carrying the offending path.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod roster;

pub use abilities::AbilityCatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::RosterStore;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
