//! Effect resolution for cards and potions.

use super::{Amount, CardEffect, EffectTarget};
use crate::engine::{ExecContext, ExecuteError};
use crate::env::{CardFlags, CardStats};
use crate::rng::StreamName;
use crate::state::{EntityId, Stance};

/// Numbers and choices an effect list resolves against.
#[derive(Clone, Debug)]
pub(crate) struct EffectSource {
    pub stats: CardStats,
    pub misc: i32,
    pub energy_spent: i32,
    /// The chosen enemy, if the card or potion took one.
    pub target: Option<EntityId>,
    /// Hand cards picked by the caller, as uids.
    pub chosen: Vec<u32>,
    /// Stream consumed by random picks.
    pub stream: StreamName,
}

impl EffectSource {
    pub fn card(stats: CardStats, misc: i32, energy_spent: i32) -> Self {
        Self {
            stats,
            misc,
            energy_spent,
            target: None,
            chosen: Vec::new(),
            stream: StreamName::CardRandom,
        }
    }

    pub fn potion() -> Self {
        Self {
            stats: CardStats {
                cost: 0,
                damage: 0,
                block: 0,
                magic: 0,
                flags: CardFlags::empty(),
            },
            misc: 0,
            energy_spent: 0,
            target: None,
            chosen: Vec::new(),
            stream: StreamName::Potion,
        }
    }

    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    pub fn with_chosen(mut self, chosen: Vec<u32>) -> Self {
        self.chosen = chosen;
        self
    }
}

impl ExecContext<'_, '_> {
    /// Resolves effects in order. Reactions raised by one effect settle before the
    /// next effect starts.
    pub(crate) fn resolve_effects(
        &mut self,
        source: &EffectSource,
        effects: &[CardEffect],
    ) -> Result<(), ExecuteError> {
        for effect in effects {
            self.batch(|ctx| ctx.resolve_effect(source, effect))?;
        }
        Ok(())
    }

    fn resolve_effect(
        &mut self,
        source: &EffectSource,
        effect: &CardEffect,
    ) -> Result<(), ExecuteError> {
        const PLAYER: EntityId = EntityId::PLAYER;

        match effect {
            CardEffect::Damage {
                amount,
                hits,
                target,
                class,
            } => {
                let hits = self.amount(source, *hits).max(0);
                for _ in 0..hits {
                    let base = self.amount(source, *amount);
                    for defender in self.targets(source, *target) {
                        self.deal_damage(Some(PLAYER), defender, base, *class)?;
                    }
                }
            }
            CardEffect::Block { amount } => {
                let amount = self.amount(source, *amount);
                self.gain_block(PLAYER, amount, true)?;
            }
            CardEffect::ApplyStatus {
                status,
                amount,
                target,
            } => {
                let amount = self.amount(source, *amount);
                for defender in self.targets(source, *target) {
                    self.apply_status(Some(PLAYER), defender, *status, amount)?;
                }
            }
            CardEffect::RemoveStatus { status, target } => {
                for owner in self.targets(source, *target) {
                    self.remove_status(owner, *status)?;
                }
            }
            CardEffect::Draw { amount } => {
                let count = self.amount(source, *amount).max(0) as u32;
                self.draw_cards(count)?;
            }
            CardEffect::GainEnergy { amount } => {
                let amount = self.amount(source, *amount);
                self.gain_energy(amount);
            }
            CardEffect::LoseHp { amount } => {
                let amount = self.amount(source, *amount);
                self.lose_hp(PLAYER, amount)?;
            }
            CardEffect::Heal { amount } => {
                let amount = self.amount(source, *amount);
                self.heal(PLAYER, amount)?;
            }
            CardEffect::EnterStance(stance) => self.change_stance(*stance)?,
            CardEffect::ExitStance => self.change_stance(Stance::Neutral)?,
            CardEffect::ExhaustFromHand { count, random } => {
                if *random {
                    for _ in 0..*count {
                        let len = self.state.piles.hand.len() as u32;
                        if len == 0 {
                            break;
                        }
                        let index = self.state.rng.draw(source.stream, len) as usize;
                        let uid = self.state.piles.hand[index].uid;
                        self.exhaust_from_hand(uid)?;
                    }
                } else {
                    for &uid in &source.chosen {
                        self.exhaust_from_hand(uid)?;
                    }
                }
            }
            CardEffect::DiscardFromHand { .. } => {
                for &uid in &source.chosen {
                    self.discard_from_hand(uid);
                }
            }
            CardEffect::AddCard {
                card,
                pile,
                count,
                upgraded,
            } => self.add_card(card, *pile, *upgraded, *count)?,
            CardEffect::GrowMisc { amount } => {
                if let Some(card) = self.limbo.as_mut() {
                    card.misc += amount;
                }
            }
            CardEffect::DoubleBlock => {
                let block = self.state.player.creature.block;
                self.gain_block(PLAYER, block, false)?;
            }
        }
        Ok(())
    }

    fn amount(&self, source: &EffectSource, amount: Amount) -> i32 {
        match amount {
            Amount::Fixed(value) => value,
            Amount::Damage => source.stats.damage,
            Amount::Block => source.stats.block,
            Amount::Magic => source.stats.magic,
            Amount::Misc => self.limbo.as_ref().map_or(source.misc, |card| card.misc),
            Amount::EnergySpent => source.energy_spent,
            Amount::CurrentBlock => self.state.player.creature.block,
        }
    }

    /// Entities an effect lands on, resolved at the moment it lands.
    fn targets(&mut self, source: &EffectSource, target: EffectTarget) -> Vec<EntityId> {
        match target {
            EffectTarget::Player => vec![EntityId::PLAYER],
            EffectTarget::Chosen => source
                .target
                .filter(|&id| self.state.is_alive(id))
                .into_iter()
                .collect(),
            EffectTarget::AllEnemies => self.state.living_enemies(),
            EffectTarget::RandomEnemy => {
                let living = self.state.living_enemies();
                if living.is_empty() {
                    return living;
                }
                let pick = self.state.rng.draw(source.stream, living.len() as u32) as usize;
                vec![living[pick]]
            }
        }
    }
}
