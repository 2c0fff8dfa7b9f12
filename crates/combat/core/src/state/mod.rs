//! Combat state aggregate.
//!
//! [`CombatState`] is a plain value: cloning it yields an independent snapshot with no
//! shared mutable data, which is what validate-then-commit and look-ahead search rely
//! on.
mod entity;
mod piles;
mod relic;
mod status;

use arrayvec::ArrayVec;

pub use entity::{Creature, EnemyEntity, EntityId, Intent, PlayerEntity, Stance};
pub use piles::{CardInstance, PileKind, Piles};
pub use relic::{RelicId, RelicState};
pub use status::{StackChange, StatusId, StatusInstance, StatusSet};

use crate::config::CombatConfig;
use crate::rng::RngStreams;

macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

content_id!(
    /// Content key of a card definition.
    CardId
);
content_id!(
    /// Content key of an enemy definition.
    EnemyId
);
content_id!(
    /// Content key of a potion definition.
    PotionId
);

/// Turn-phase state machine states.
///
/// `TurnStart -> Draw -> PostDrawHooks -> PlayerActionLoop -> EndTurnHooksPreDiscard
/// -> Discard -> EndTurnHooksPostDiscard -> EnemyTurn -> RoundEndHooks -> TurnStart`,
/// with `CombatEnd` reachable from any phase that can kill a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnPhase {
    TurnStart,
    Draw,
    PostDrawHooks,
    PlayerActionLoop,
    EndTurnHooksPreDiscard,
    Discard,
    EndTurnHooksPostDiscard,
    EnemyTurn,
    RoundEndHooks,
    CombatEnd,
}

impl TurnPhase {
    /// The phase that follows this one when the combat is still running.
    ///
    /// `PlayerActionLoop` loops on itself until an end-turn action arrives, and
    /// `CombatEnd` is terminal.
    pub const fn successor(self) -> Self {
        match self {
            Self::TurnStart => Self::Draw,
            Self::Draw => Self::PostDrawHooks,
            Self::PostDrawHooks => Self::PlayerActionLoop,
            Self::PlayerActionLoop => Self::EndTurnHooksPreDiscard,
            Self::EndTurnHooksPreDiscard => Self::Discard,
            Self::Discard => Self::EndTurnHooksPostDiscard,
            Self::EndTurnHooksPostDiscard => Self::EnemyTurn,
            Self::EnemyTurn => Self::RoundEndHooks,
            Self::RoundEndHooks => Self::TurnStart,
            Self::CombatEnd => Self::CombatEnd,
        }
    }

    pub const fn accepts_actions(self) -> bool {
        matches!(self, Self::PlayerActionLoop)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CombatEnd)
    }
}

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Counters that reset at the start of every player turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnCounters {
    pub cards_played: u32,
    pub attacks_played: u32,
    pub skills_played: u32,
    pub powers_played: u32,
    pub cards_drawn: u32,
}

/// Root aggregate for one encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// Player turn number, starting at 1.
    pub turn: u32,
    pub phase: TurnPhase,
    pub outcome: Option<CombatOutcome>,
    pub player: PlayerEntity,
    pub enemies: Vec<EnemyEntity>,
    pub piles: Piles,
    pub relics: Vec<RelicState>,
    pub potions: ArrayVec<Option<PotionId>, { CombatConfig::MAX_POTION_SLOTS }>,
    pub rng: RngStreams,
    pub counters: TurnCounters,
    /// Attacks played during the previous player turn.
    pub last_turn_attacks: u32,
    /// Next uid handed to a card created in this combat.
    pub next_card_uid: u32,
    /// External actions applied so far.
    pub actions_applied: u64,
    pub config: CombatConfig,
}

impl CombatState {
    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        match id.enemy_index() {
            None => Some(&self.player.creature),
            Some(i) => self.enemies.get(i).map(|e| &e.creature),
        }
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        match id.enemy_index() {
            None => Some(&mut self.player.creature),
            Some(i) => self.enemies.get_mut(i).map(|e| &mut e.creature),
        }
    }

    /// Ids of every entity, player first.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        core::iter::once(EntityId::PLAYER).chain((0..self.enemies.len()).map(EntityId::enemy))
    }

    /// Ids of living enemies in encounter order.
    pub fn living_enemies(&self) -> Vec<EntityId> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, _)| EntityId::enemy(i))
            .collect()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.creature(id).is_some_and(|c| !c.is_dead())
    }

    pub fn relic(&self, id: RelicId) -> Option<&RelicState> {
        self.relics.iter().find(|r| r.id == id)
    }

    pub fn relic_mut(&mut self, id: RelicId) -> Option<&mut RelicState> {
        self.relics.iter_mut().find(|r| r.id == id)
    }

    pub fn has_relic(&self, id: RelicId) -> bool {
        self.relic(id).is_some()
    }

    /// Hands out a fresh card uid.
    pub fn allocate_uid(&mut self) -> u32 {
        let uid = self.next_card_uid;
        self.next_card_uid += 1;
        uid
    }

    /// Bincode encoding of the full state.
    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// SHA-256 over the bincode encoding; equal digests mean equal states.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = self.to_bytes()?;
        Ok(Sha256::digest(&bytes).into())
    }
}
