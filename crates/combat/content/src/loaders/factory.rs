//! Content factory for building a [`ContentSnapshot`] from data files.

use std::path::{Path, PathBuf};

use anyhow::bail;
use combat_core::{
    CardDefinition, CombatConfig, ContentSnapshot, EnemyDefinition, PotionDefinition,
    RelicDefinition, StatusDescriptor,
};

use crate::loaders::{
    CardLoader, ConfigLoader, EnemyLoader, LoadResult, PotionLoader, RelicLoader, StatusLoader,
    validate,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── statuses.ron
/// ├── relics.ron
/// ├── potions.ron
/// └── enemies.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the bundled data, unless `COMBAT_DATA_DIR` points elsewhere.
    pub fn from_env() -> Self {
        match std::env::var(crate::DATA_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::new(crate::bundled_data_dir()),
        }
    }

    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_cards(&self) -> LoadResult<Vec<CardDefinition>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    pub fn load_statuses(&self) -> LoadResult<Vec<StatusDescriptor>> {
        StatusLoader::load(&self.data_dir.join("statuses.ron"))
    }

    pub fn load_relics(&self) -> LoadResult<Vec<RelicDefinition>> {
        RelicLoader::load(&self.data_dir.join("relics.ron"))
    }

    pub fn load_potions(&self) -> LoadResult<Vec<PotionDefinition>> {
        PotionLoader::load(&self.data_dir.join("potions.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyDefinition>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Loads every table, rejects duplicate keys, and validates cross references.
    pub fn load_snapshot(&self) -> LoadResult<ContentSnapshot> {
        if !self.data_dir.is_dir() {
            bail!(
                "Content data directory not found: {} (set {} to override)",
                self.data_dir.display(),
                crate::DATA_DIR_ENV
            );
        }

        let mut content = ContentSnapshot::new(self.load_config()?);
        for status in unique(self.load_statuses()?, |s| s.id.to_string(), "status")? {
            content.insert_status(status);
        }
        for relic in unique(self.load_relics()?, |r| r.id.to_string(), "relic")? {
            content.insert_relic(relic);
        }
        for card in unique(self.load_cards()?, |c| c.id.to_string(), "card")? {
            content.insert_card(card);
        }
        for potion in unique(self.load_potions()?, |p| p.id.to_string(), "potion")? {
            content.insert_potion(potion);
        }
        for enemy in unique(self.load_enemies()?, |e| e.id.to_string(), "enemy")? {
            content.insert_enemy(enemy);
        }

        validate(&content)?;
        Ok(content)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn unique<T>(items: Vec<T>, key: impl Fn(&T) -> String, what: &str) -> LoadResult<Vec<T>> {
    let mut seen = std::collections::BTreeSet::new();
    for item in &items {
        let key = key(item);
        if !seen.insert(key.clone()) {
            bail!("duplicate {what} entry `{key}`");
        }
    }
    Ok(items)
}
