//! Content loaders for reading combat data from files.
//!
//! Every table is a RON catalog; the engine configuration is TOML.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod validate;

pub use catalog::{CardLoader, EnemyLoader, PotionLoader, RelicLoader, StatusLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use validate::validate;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
