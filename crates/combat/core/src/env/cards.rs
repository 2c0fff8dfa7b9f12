//! Card definitions.

use bitflags::bitflags;

use crate::cards::CardEffect;
use crate::state::CardId;

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

/// What a card or potion must be aimed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardTarget {
    /// One living enemy, chosen by the caller.
    Enemy,
    AllEnemies,
    #[default]
    SelfOnly,
    None,
}

bitflags! {
    /// Card keywords.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CardFlags: u8 {
        /// Moves to the exhaust pile instead of discard when played.
        const EXHAUST    = 1 << 0;
        /// Exhausted from hand at end of turn if not played.
        const ETHEREAL   = 1 << 1;
        /// Stays in hand through the end-of-turn discard.
        const RETAIN     = 1 << 2;
        /// Starts the combat on top of the draw pile.
        const INNATE     = 1 << 3;
        const UNPLAYABLE = 1 << 4;
    }
}

/// Numeric deltas applied when a card is upgraded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardUpgrade {
    /// Replacement cost.
    pub cost: Option<i32>,
    pub damage: i32,
    pub block: i32,
    pub magic: i32,
    pub add_flags: CardFlags,
    pub remove_flags: CardFlags,
}

/// Static definition of one card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: CardId,
    pub card_type: CardType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: CardTarget,
    /// `-1` is X-cost, `-2` is unplayable.
    pub cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_block: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: CardFlags,
    pub effects: Vec<CardEffect>,
    /// Effects resolved while the card sits in hand at end of turn (before discard).
    #[cfg_attr(feature = "serde", serde(default))]
    pub end_of_turn: Vec<CardEffect>,
    /// Effects resolved when the card is drawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_draw: Vec<CardEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrade: CardUpgrade,
}

/// Numbers of a card after applying (or not) its upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardStats {
    pub cost: i32,
    pub damage: i32,
    pub block: i32,
    pub magic: i32,
    pub flags: CardFlags,
}

impl CardDefinition {
    pub const X_COST: i32 = -1;
    pub const UNPLAYABLE_COST: i32 = -2;

    pub fn stats(&self, upgraded: bool) -> CardStats {
        if !upgraded {
            return CardStats {
                cost: self.cost,
                damage: self.base_damage,
                block: self.base_block,
                magic: self.magic,
                flags: self.flags,
            };
        }
        let up = &self.upgrade;
        CardStats {
            cost: up.cost.unwrap_or(self.cost),
            damage: self.base_damage + up.damage,
            block: self.base_block + up.block,
            magic: self.magic + up.magic,
            flags: (self.flags | up.add_flags) - up.remove_flags,
        }
    }

    /// True when the card can never be played from hand.
    pub fn is_unplayable(&self, upgraded: bool) -> bool {
        let stats = self.stats(upgraded);
        stats.cost == Self::UNPLAYABLE_COST
            || stats.flags.contains(CardFlags::UNPLAYABLE)
            || (matches!(self.card_type, CardType::Status | CardType::Curse)
                && self.effects.is_empty())
    }
}

/// Read-only access to card definitions.
pub trait CardOracle: Send + Sync {
    fn card(&self, id: &CardId) -> Option<&CardDefinition>;
}
