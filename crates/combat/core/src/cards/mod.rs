//! Card and potion effects, and the pile engine that plays them.
//!
//! Effects are tagged-variant descriptors supplied by content. Resolution lives in
//! [`effects`] and the play pipeline (validate, pay, fire, resolve, move) in [`play`].
pub(crate) mod available;
pub(crate) mod effects;
pub(crate) mod play;

pub use available::available_actions;

use crate::action::SelectionKind;
use crate::combat::DamageClass;
use crate::state::{CardId, PileKind, Stance, StatusId};

/// A number an effect reads at resolution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Amount {
    Fixed(i32),
    /// The card's damage stat (after upgrade).
    Damage,
    /// The card's block stat (after upgrade).
    Block,
    /// The card's magic number (after upgrade).
    Magic,
    /// The card instance's scratch counter.
    Misc,
    /// Energy spent on an X-cost card.
    EnergySpent,
    /// The player's current block.
    CurrentBlock,
}

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    /// The enemy chosen for the card or potion.
    #[default]
    Chosen,
    AllEnemies,
    /// A living enemy picked on the card's RNG stream.
    RandomEnemy,
    Player,
}

/// One step of a card or potion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardEffect {
    Damage {
        amount: Amount,
        #[cfg_attr(feature = "serde", serde(default = "single_hit"))]
        hits: Amount,
        #[cfg_attr(feature = "serde", serde(default))]
        target: EffectTarget,
        #[cfg_attr(feature = "serde", serde(default))]
        class: DamageClass,
    },
    /// Block for the player, routed through Dexterity and Frail.
    Block {
        amount: Amount,
    },
    ApplyStatus {
        status: StatusId,
        amount: Amount,
        #[cfg_attr(feature = "serde", serde(default))]
        target: EffectTarget,
    },
    RemoveStatus {
        status: StatusId,
        #[cfg_attr(feature = "serde", serde(default))]
        target: EffectTarget,
    },
    Draw {
        amount: Amount,
    },
    GainEnergy {
        amount: Amount,
    },
    /// HP loss for the player that bypasses block.
    LoseHp {
        amount: Amount,
    },
    Heal {
        amount: Amount,
    },
    EnterStance(Stance),
    ExitStance,
    /// Exhausts cards from hand: chosen by the caller, or drawn on the card stream.
    ExhaustFromHand {
        count: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        random: bool,
    },
    /// Discards cards chosen by the caller.
    DiscardFromHand {
        count: u32,
    },
    AddCard {
        card: CardId,
        pile: PileKind,
        #[cfg_attr(feature = "serde", serde(default = "one_copy"))]
        count: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        upgraded: bool,
    },
    /// Grows the played card's scratch counter.
    GrowMisc {
        amount: i32,
    },
    DoubleBlock,
}

#[cfg(feature = "serde")]
fn single_hit() -> Amount {
    Amount::Fixed(1)
}

#[cfg(feature = "serde")]
fn one_copy() -> u32 {
    1
}

impl CardEffect {
    /// The hand selection this effect asks the caller for, if any.
    pub fn selection(&self) -> Option<SelectionKind> {
        match *self {
            Self::ExhaustFromHand {
                count,
                random: false,
            } => Some(SelectionKind::Exhaust {
                count: count as usize,
            }),
            Self::DiscardFromHand { count } => Some(SelectionKind::Discard {
                count: count as usize,
            }),
            _ => None,
        }
    }

    /// True when the effect reads the chosen enemy.
    pub fn needs_target(&self) -> bool {
        matches!(
            self,
            Self::Damage {
                target: EffectTarget::Chosen,
                ..
            } | Self::ApplyStatus {
                target: EffectTarget::Chosen,
                ..
            } | Self::RemoveStatus {
                target: EffectTarget::Chosen,
                ..
            }
        )
    }
}

/// The selection required by an effect list. Content validation allows at most one.
pub fn selection_for(effects: &[CardEffect]) -> Option<SelectionKind> {
    effects.iter().find_map(CardEffect::selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_exhaust_needs_no_selection() {
        let chosen = CardEffect::ExhaustFromHand {
            count: 1,
            random: false,
        };
        let random = CardEffect::ExhaustFromHand {
            count: 1,
            random: true,
        };
        assert_eq!(chosen.selection(), Some(SelectionKind::Exhaust { count: 1 }));
        assert_eq!(random.selection(), None);
        assert_eq!(
            selection_for(&[random, CardEffect::DiscardFromHand { count: 2 }]),
            Some(SelectionKind::Discard { count: 2 })
        );
    }

    #[test]
    fn defaults_fill_in_single_hit_at_chosen_enemy() {
        let effect: CardEffect = serde_json::from_str(r#"{"Damage":{"amount":"Damage"}}"#).unwrap();
        assert_eq!(
            effect,
            CardEffect::Damage {
                amount: Amount::Damage,
                hits: Amount::Fixed(1),
                target: EffectTarget::Chosen,
                class: DamageClass::Normal,
            }
        );
        assert!(effect.needs_target());
    }
}
