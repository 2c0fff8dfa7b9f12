//! In-memory content tables.
//!
//! [`ContentSnapshot`] implements every oracle trait over ordered maps. The content
//! crate fills one from data files; tests build one directly.

use std::collections::BTreeMap;

use super::{
    CardDefinition, CardOracle, EnemyDefinition, EnemyOracle, PotionDefinition, PotionOracle,
    RelicDefinition, RelicOracle, StatusDescriptor, StatusOracle,
};
use crate::config::CombatConfig;
use crate::state::{CardId, EnemyId, PotionId, RelicId, StatusId};

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Complete content tables for one rule set.
#[derive(Clone, Debug, Default)]
pub struct ContentSnapshot {
    pub config: CombatConfig,
    cards: BTreeMap<CardId, CardDefinition>,
    statuses: BTreeMap<StatusId, StatusDescriptor>,
    relics: BTreeMap<RelicId, RelicDefinition>,
    potions: BTreeMap<PotionId, PotionDefinition>,
    enemies: BTreeMap<EnemyId, EnemyDefinition>,
}

impl ContentSnapshot {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.insert_card(card);
        self
    }

    pub fn with_status(mut self, status: StatusDescriptor) -> Self {
        self.insert_status(status);
        self
    }

    pub fn with_relic(mut self, relic: RelicDefinition) -> Self {
        self.insert_relic(relic);
        self
    }

    pub fn with_potion(mut self, potion: PotionDefinition) -> Self {
        self.insert_potion(potion);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyDefinition) -> Self {
        self.insert_enemy(enemy);
        self
    }

    pub fn insert_card(&mut self, card: CardDefinition) {
        self.cards.insert(card.id.clone(), card);
    }

    pub fn insert_status(&mut self, status: StatusDescriptor) {
        self.statuses.insert(status.id, status);
    }

    pub fn insert_relic(&mut self, relic: RelicDefinition) {
        self.relics.insert(relic.id, relic);
    }

    pub fn insert_potion(&mut self, potion: PotionDefinition) {
        self.potions.insert(potion.id.clone(), potion);
    }

    pub fn insert_enemy(&mut self, enemy: EnemyDefinition) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    pub fn statuses(&self) -> impl Iterator<Item = &StatusDescriptor> {
        self.statuses.values()
    }

    pub fn relics(&self) -> impl Iterator<Item = &RelicDefinition> {
        self.relics.values()
    }

    pub fn potions(&self) -> impl Iterator<Item = &PotionDefinition> {
        self.potions.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.values()
    }
}

// ============================================================================
// Oracle Implementations
// ============================================================================

impl CardOracle for ContentSnapshot {
    fn card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }
}

impl StatusOracle for ContentSnapshot {
    fn status(&self, id: StatusId) -> Option<&StatusDescriptor> {
        self.statuses.get(&id)
    }
}

impl RelicOracle for ContentSnapshot {
    fn relic(&self, id: RelicId) -> Option<&RelicDefinition> {
        self.relics.get(&id)
    }
}

impl PotionOracle for ContentSnapshot {
    fn potion(&self, id: &PotionId) -> Option<&PotionDefinition> {
        self.potions.get(id)
    }
}

impl EnemyOracle for ContentSnapshot {
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }
}
