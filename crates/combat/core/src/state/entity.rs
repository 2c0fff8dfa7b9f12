//! Player and enemy aggregates.
//!
//! Both share a [`Creature`] (hp, block, statuses); the player additionally owns
//! energy and a stance, enemies own an intent and a move history. Entities are
//! addressed by [`EntityId`] only: `0` is the player, `1..` are enemies in encounter
//! order.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

use super::{EnemyId, StatusSet};

/// Index of an entity within the combat state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u8);

impl EntityId {
    pub const PLAYER: Self = Self(0);

    /// Id of the enemy at `index` in encounter order.
    pub const fn enemy(index: usize) -> Self {
        Self(index as u8 + 1)
    }

    pub const fn is_player(self) -> bool {
        self.0 == 0
    }

    /// Encounter index, or `None` for the player.
    pub const fn enemy_index(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.enemy_index() {
            None => f.write_str("player"),
            Some(i) => write!(f, "enemy#{i}"),
        }
    }
}

/// Capabilities every combatant has.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub statuses: StatusSet,
}

impl Creature {
    pub fn new(hp: i32, max_hp: i32) -> Self {
        Self {
            hp,
            max_hp,
            block: 0,
            statuses: StatusSet::new(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Restores up to `amount` hp without exceeding `max_hp`. Returns hp gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 || self.is_dead() {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }
}

/// Mutually exclusive player mode.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stance {
    #[default]
    Neutral,
    Wrath,
    Calm,
    Divinity,
}

impl Stance {
    /// Multiplier on NORMAL damage dealt while in this stance.
    pub const fn damage_given(self) -> f32 {
        match self {
            Self::Wrath => 2.0,
            Self::Divinity => 3.0,
            Self::Neutral | Self::Calm => 1.0,
        }
    }

    /// Multiplier on NORMAL damage received while in this stance.
    pub const fn damage_received(self) -> f32 {
        match self {
            Self::Wrath => 2.0,
            Self::Neutral | Self::Calm | Self::Divinity => 1.0,
        }
    }

    /// Energy gained when entering this stance.
    pub const fn energy_on_enter(self) -> i32 {
        match self {
            Self::Divinity => 3,
            _ => 0,
        }
    }

    /// Energy gained when leaving this stance.
    pub const fn energy_on_exit(self) -> i32 {
        match self {
            Self::Calm => 2,
            _ => 0,
        }
    }
}

/// The player aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEntity {
    pub creature: Creature,
    pub energy: i32,
    pub energy_per_turn: i32,
    pub stance: Stance,
}

/// An enemy's chosen next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub move_id: u8,
}

/// One enemy in the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyEntity {
    pub creature: Creature,
    pub enemy: EnemyId,
    pub intent: Option<Intent>,
    /// Most recent moves, newest last.
    pub history: ArrayVec<u8, { CombatConfig::MOVE_HISTORY }>,
    /// Moves taken this combat, used by `FirstThen` patterns.
    pub moves_taken: u32,
}

impl EnemyEntity {
    pub fn new(enemy: EnemyId, hp: i32) -> Self {
        Self {
            creature: Creature::new(hp, hp),
            enemy,
            intent: None,
            history: ArrayVec::new(),
            moves_taken: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.creature.is_dead()
    }

    /// Records a move in the bounded history, dropping the oldest when full.
    pub fn remember(&mut self, move_id: u8) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(move_id);
        self.moves_taken += 1;
    }

    /// Number of trailing history entries equal to `move_id`.
    pub fn repeat_count(&self, move_id: u8) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|&&m| m == move_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_map_to_encounter_indices() {
        assert!(EntityId::PLAYER.is_player());
        assert_eq!(EntityId::enemy(2), EntityId(3));
        assert_eq!(EntityId(3).enemy_index(), Some(2));
        assert_eq!(EntityId::PLAYER.enemy_index(), None);
    }

    #[test]
    fn heal_respects_max_hp_and_death() {
        let mut creature = Creature::new(70, 80);
        assert_eq!(creature.heal(20), 10);
        creature.hp = 0;
        assert_eq!(creature.heal(5), 0);
    }

    #[test]
    fn move_history_is_bounded() {
        let mut enemy = EnemyEntity::new(EnemyId::from("jaw_worm"), 40);
        for m in [1, 2, 2, 2] {
            enemy.remember(m);
        }
        assert_eq!(enemy.history.as_slice(), &[2, 2, 2]);
        assert_eq!(enemy.repeat_count(2), 3);
        assert_eq!(enemy.moves_taken, 4);
    }
}
