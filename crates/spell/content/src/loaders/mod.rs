//! Content loaders for reading spell data from files.

pub mod book;
pub mod config;
pub mod pool;

pub use book::{SpellBook, SpellBookEntry, SpellBookLoader};
pub use config::ConfigLoader;
pub use pool::{TokenPool, TokenPoolLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
