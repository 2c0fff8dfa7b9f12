//! RON catalogs for cards, statuses, relics, potions and enemies.
//!
//! Each file holds one catalog struct with a single list field, e.g.
//!
//! ```ron
//! (
//!     cards: [
//!         (id: "strike", card_type: Attack, target: Enemy, cost: 1, base_damage: 6,
//!          effects: [Damage(amount: Damage)]),
//!     ],
//! )
//! ```

use std::path::Path;

use combat_core::{
    CardDefinition, EnemyDefinition, PotionDefinition, RelicDefinition, StatusDescriptor,
};
use ron::extensions::Extensions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Flag sets (`hooks`, `flags`) are written as bare strings, not `HookSet("...")`.
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(Extensions::UNWRAP_NEWTYPES)
}

fn load_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron_options()
        .from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelicCatalog {
    pub relics: Vec<RelicDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotionCatalog {
    pub potions: Vec<PotionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyDefinition>,
}

/// Loader for the card catalog.
pub struct CardLoader;

impl CardLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        let catalog: CardCatalog = load_ron(path, "card catalog")?;
        Ok(catalog.cards)
    }
}

/// Loader for status descriptors.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusDescriptor>> {
        let catalog: StatusCatalog = load_ron(path, "status catalog")?;
        Ok(catalog.statuses)
    }
}

pub struct RelicLoader;

impl RelicLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RelicDefinition>> {
        let catalog: RelicCatalog = load_ron(path, "relic catalog")?;
        Ok(catalog.relics)
    }
}

pub struct PotionLoader;

impl PotionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<PotionDefinition>> {
        let catalog: PotionCatalog = load_ron(path, "potion catalog")?;
        Ok(catalog.potions)
    }
}

/// Loader for enemy definitions (hp range, moves and AI pattern).
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyDefinition>> {
        let catalog: EnemyCatalog = load_ron(path, "enemy catalog")?;
        Ok(catalog.enemies)
    }
}
