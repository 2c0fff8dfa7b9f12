//! Data-driven combat content.
//!
//! Card, status, relic, potion and enemy tables live as RON files next to a TOML
//! `config.toml` under `data/`. The loaders turn them into a
//! [`combat_core::ContentSnapshot`], which implements every oracle the engine reads.
//!
//! Content is consumed through the oracles and never appears in combat state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, EnemyLoader, PotionLoader, RelicLoader,
    StatusLoader, validate,
};

use std::path::PathBuf;

/// Environment variable that overrides the bundled data directory.
pub const DATA_DIR_ENV: &str = "COMBAT_DATA_DIR";

/// The data directory shipped with this crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}
