//! Status/relic hook system.
//!
//! Hooks are named event points in the turn lifecycle and action pipeline. A status
//! or relic participates in a hook when
//!
//! 1. its content descriptor lists the hook in its [`HookSet`], and
//! 2. it appears in the hook's declared listener list ([`order`]).
//!
//! The declared list is the firing order; it never depends on the order statuses were
//! applied or relics acquired. Behaviors are tagged-variant dispatch keyed by
//! `(HookKind, StatusId)` / `(HookKind, RelicId)` in [`status`] and [`relic`].
//!
//! Listeners either rewrite the event payload (for payload-threading hooks such as
//! [`HookKind::AttackedToChangeDamage`]) or enqueue [`Reaction`]s. Reactions are
//! processed after the current firing's listener list is exhausted, breadth-first.
pub(crate) mod dispatch;
pub mod order;
mod relic;
mod status;

use bitflags::bitflags;

use crate::combat::DamageClass;
use crate::env::CardType;
use crate::state::{CardId, EntityId, RelicId, StackChange, Stance, StatusId};

/// Named hook points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookKind {
    CombatStart,
    TurnStart,
    PostDraw,
    CardPlayed,
    AfterCardPlayed,
    DamageGiven,
    AttackedToChangeDamage,
    Attacked,
    DamageReceived,
    LoseHpModify,
    HpLost,
    TurnEnd,
    TurnEndPostDiscard,
    RoundEnd,
    StackChanged,
    StanceChange,
    Shuffle,
    Exhaust,
    ApplyStatusModify,
    Victory,
    Defeat,
}

bitflags! {
    /// Set of hooks a status or relic participates in.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HookSet: u32 {
        const COMBAT_START              = 1 << 0;
        const TURN_START                = 1 << 1;
        const POST_DRAW                 = 1 << 2;
        const CARD_PLAYED               = 1 << 3;
        const AFTER_CARD_PLAYED         = 1 << 4;
        const DAMAGE_GIVEN              = 1 << 5;
        const ATTACKED_TO_CHANGE_DAMAGE = 1 << 6;
        const ATTACKED                  = 1 << 7;
        const DAMAGE_RECEIVED           = 1 << 8;
        const LOSE_HP_MODIFY            = 1 << 9;
        const HP_LOST                   = 1 << 10;
        const TURN_END                  = 1 << 11;
        const TURN_END_POST_DISCARD     = 1 << 12;
        const ROUND_END                 = 1 << 13;
        const STACK_CHANGED             = 1 << 14;
        const STANCE_CHANGE             = 1 << 15;
        const SHUFFLE                   = 1 << 16;
        const EXHAUST                   = 1 << 17;
        const APPLY_STATUS_MODIFY       = 1 << 18;
        const VICTORY                   = 1 << 19;
        const DEFEAT                    = 1 << 20;
    }
}

impl HookKind {
    pub const ALL: [HookKind; 21] = [
        Self::CombatStart,
        Self::TurnStart,
        Self::PostDraw,
        Self::CardPlayed,
        Self::AfterCardPlayed,
        Self::DamageGiven,
        Self::AttackedToChangeDamage,
        Self::Attacked,
        Self::DamageReceived,
        Self::LoseHpModify,
        Self::HpLost,
        Self::TurnEnd,
        Self::TurnEndPostDiscard,
        Self::RoundEnd,
        Self::StackChanged,
        Self::StanceChange,
        Self::Shuffle,
        Self::Exhaust,
        Self::ApplyStatusModify,
        Self::Victory,
        Self::Defeat,
    ];

    pub const fn flag(self) -> HookSet {
        HookSet::from_bits_retain(1 << self as u32)
    }

    /// Payload-threading hooks rewrite a value in place and must not drain reactions.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::AttackedToChangeDamage | Self::LoseHpModify | Self::ApplyStatusModify
        )
    }
}

/// A participant in a hook's declared order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Listener {
    Status(StatusId),
    Relic(RelicId),
}

impl core::fmt::Display for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Status(id) => write!(f, "status:{id}"),
            Self::Relic(id) => write!(f, "relic:{id}"),
        }
    }
}

/// Summary of the card that triggered a card hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayedCard {
    pub uid: u32,
    pub id: CardId,
    pub card_type: CardType,
    pub target: Option<EntityId>,
}

/// Hook payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum HookEvent {
    CombatStart,
    TurnStart,
    PostDraw,
    CardPlayed(PlayedCard),
    AfterCardPlayed(PlayedCard),
    /// Fired on the attacker after hp damage landed.
    DamageGiven {
        target: EntityId,
        class: DamageClass,
        amount: i32,
    },
    /// Fired on the defender with the post-block amount, which listeners may lower.
    AttackedToChangeDamage {
        source: Option<EntityId>,
        class: DamageClass,
        amount: i32,
    },
    /// Fired on the defender for every attack by an entity, blocked or not.
    Attacked {
        source: Option<EntityId>,
        class: DamageClass,
        amount: i32,
    },
    /// Fired on the defender when unblocked damage is about to land.
    DamageReceived {
        source: Option<EntityId>,
        class: DamageClass,
        amount: i32,
    },
    LoseHpModify {
        class: DamageClass,
        amount: i32,
    },
    HpLost {
        class: DamageClass,
        amount: i32,
    },
    TurnEnd,
    TurnEndPostDiscard,
    RoundEnd,
    StackChanged(StackChange),
    StanceChange {
        from: Stance,
        to: Stance,
    },
    Shuffle,
    Exhaust {
        uid: u32,
        id: CardId,
    },
    ApplyStatusModify {
        source: Option<EntityId>,
        status: StatusId,
        amount: i32,
        negated: bool,
    },
    Victory,
    Defeat,
}

impl HookEvent {
    pub fn kind(&self) -> HookKind {
        match self {
            Self::CombatStart => HookKind::CombatStart,
            Self::TurnStart => HookKind::TurnStart,
            Self::PostDraw => HookKind::PostDraw,
            Self::CardPlayed(_) => HookKind::CardPlayed,
            Self::AfterCardPlayed(_) => HookKind::AfterCardPlayed,
            Self::DamageGiven { .. } => HookKind::DamageGiven,
            Self::AttackedToChangeDamage { .. } => HookKind::AttackedToChangeDamage,
            Self::Attacked { .. } => HookKind::Attacked,
            Self::DamageReceived { .. } => HookKind::DamageReceived,
            Self::LoseHpModify { .. } => HookKind::LoseHpModify,
            Self::HpLost { .. } => HookKind::HpLost,
            Self::TurnEnd => HookKind::TurnEnd,
            Self::TurnEndPostDiscard => HookKind::TurnEndPostDiscard,
            Self::RoundEnd => HookKind::RoundEnd,
            Self::StackChanged(_) => HookKind::StackChanged,
            Self::StanceChange { .. } => HookKind::StanceChange,
            Self::Shuffle => HookKind::Shuffle,
            Self::Exhaust { .. } => HookKind::Exhaust,
            Self::ApplyStatusModify { .. } => HookKind::ApplyStatusModify,
            Self::Victory => HookKind::Victory,
            Self::Defeat => HookKind::Defeat,
        }
    }
}

/// Deferred effects enqueued by listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum Reaction {
    Damage {
        source: Option<EntityId>,
        target: EntityId,
        base: i32,
        class: DamageClass,
    },
    /// Damage to every living enemy.
    DamageAllEnemies {
        source: Option<EntityId>,
        base: i32,
        class: DamageClass,
    },
    /// Block gain; `modified` routes it through Dexterity/Frail.
    GainBlock {
        target: EntityId,
        amount: i32,
        modified: bool,
    },
    ApplyStatus {
        source: Option<EntityId>,
        target: EntityId,
        status: StatusId,
        amount: i32,
    },
    ApplyStatusAllEnemies {
        source: Option<EntityId>,
        status: StatusId,
        amount: i32,
    },
    ReduceStatus {
        target: EntityId,
        status: StatusId,
        amount: i32,
    },
    RemoveStatus {
        target: EntityId,
        status: StatusId,
    },
    Draw(u32),
    GainEnergy(i32),
    Heal {
        target: EntityId,
        amount: i32,
    },
    ChangeStance(Stance),
    /// Fires `StackChanged` on the owner of a stack mutated inside a listener.
    StackChanged(StackChange),
}

/// One listener invocation, recorded when hook tracing is enabled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiredHook {
    pub hook: HookKind,
    pub subject: EntityId,
    pub listener: Listener,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_flag() {
        let mut seen = HookSet::empty();
        for kind in HookKind::ALL {
            assert!(!seen.intersects(kind.flag()), "{kind} shares a bit");
            seen |= kind.flag();
        }
        assert_eq!(seen, HookSet::all());
    }
}
