//! Primitive state mutations. Every hp, block, status, energy, stance and pile change
//! made by cards, potions, enemy moves and hook reactions goes through here.

use super::{ExecContext, ExecuteError};
use crate::combat::{
    DamageClass, DamageEvent, DamageReport, block_calc, compute_damage, damage_modifiers,
};
use crate::cards::effects::EffectSource;
use crate::env::{DecayStep, DecayTiming, FreshGuard};
use crate::hooks::{HookEvent, Reaction};
use crate::rng::StreamName;
use crate::state::{CardId, CardInstance, EntityId, PileKind, Stance, StatusId, TurnPhase};

impl ExecContext<'_, '_> {
    pub(crate) fn apply_reaction(&mut self, reaction: Reaction) -> Result<(), ExecuteError> {
        match reaction {
            Reaction::Damage {
                source,
                target,
                base,
                class,
            } => {
                self.deal_damage(source, target, base, class)?;
            }
            Reaction::DamageAllEnemies { source, base, class } => {
                for target in self.state.living_enemies() {
                    self.deal_damage(source, target, base, class)?;
                }
            }
            Reaction::GainBlock {
                target,
                amount,
                modified,
            } => self.gain_block(target, amount, modified)?,
            Reaction::ApplyStatus {
                source,
                target,
                status,
                amount,
            } => self.apply_status(source, target, status, amount)?,
            Reaction::ApplyStatusAllEnemies {
                source,
                status,
                amount,
            } => {
                for target in self.state.living_enemies() {
                    self.apply_status(source, target, status, amount)?;
                }
            }
            Reaction::ReduceStatus {
                target,
                status,
                amount,
            } => self.reduce_status(target, status, amount)?,
            Reaction::RemoveStatus { target, status } => self.remove_status(target, status)?,
            Reaction::Draw(count) => self.draw_cards(count)?,
            Reaction::GainEnergy(amount) => self.gain_energy(amount),
            Reaction::Heal { target, amount } => self.heal(target, amount)?,
            Reaction::ChangeStance(stance) => self.change_stance(stance)?,
            Reaction::StackChanged(change) => {
                self.fire(change.owner, HookEvent::StackChanged(change))?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Damage and block
    // ========================================================================

    /// Computes damage through the pipeline and resolves it against `target`.
    pub(crate) fn deal_damage(
        &mut self,
        source: Option<EntityId>,
        target: EntityId,
        base: i32,
        class: DamageClass,
    ) -> Result<DamageReport, ExecuteError> {
        if !self.state.is_alive(target) {
            return Ok(DamageReport::default());
        }
        let mods = damage_modifiers(self.state, &self.env, source, Some(target), class)?;
        let event = DamageEvent {
            source,
            target,
            base,
            class,
            computed: compute_damage(&mods, base, class),
        };
        self.batch(|ctx| ctx.resolve_damage(&event))
    }

    /// Block absorbs first; post-block reductions (Torii, Buffer) see the remainder.
    fn resolve_damage(&mut self, event: &DamageEvent) -> Result<DamageReport, ExecuteError> {
        let DamageEvent {
            source,
            target,
            class,
            computed,
            ..
        } = *event;
        let mut report = DamageReport::default();
        let mut amount = computed;

        if class.is_blockable() {
            let creature = self.creature_mut(target)?;
            report.blocked = amount.min(creature.block);
            creature.block -= report.blocked;
            amount -= report.blocked;
        }

        if let HookEvent::AttackedToChangeDamage { amount: reduced, .. } = self.fire(
            target,
            HookEvent::AttackedToChangeDamage {
                source,
                class,
                amount,
            },
        )? {
            amount = reduced;
        }

        if source.is_some() {
            self.fire(
                target,
                HookEvent::Attacked {
                    source,
                    class,
                    amount,
                },
            )?;
        }
        self.fire(
            target,
            HookEvent::DamageReceived {
                source,
                class,
                amount,
            },
        )?;

        if amount > 0
            && let HookEvent::LoseHpModify { amount: reduced, .. } =
                self.fire(target, HookEvent::LoseHpModify { class, amount })?
        {
            amount = reduced;
        }

        if amount > 0 {
            let creature = self.creature_mut(target)?;
            let before = creature.hp;
            creature.hp = (creature.hp - amount).max(0);
            report.hp_lost = before - creature.hp;
            report.killed = creature.is_dead();
            if report.killed {
                creature.block = 0;
            }
        }

        if report.hp_lost > 0 {
            self.fire(
                target,
                HookEvent::HpLost {
                    class,
                    amount: report.hp_lost,
                },
            )?;
            if let Some(attacker) = source {
                self.fire(
                    attacker,
                    HookEvent::DamageGiven {
                        target,
                        class,
                        amount: report.hp_lost,
                    },
                )?;
            }
        }
        Ok(report)
    }

    /// Adds block; `modified` block goes through Dexterity and Frail.
    pub(crate) fn gain_block(
        &mut self,
        target: EntityId,
        amount: i32,
        modified: bool,
    ) -> Result<(), ExecuteError> {
        if !self.state.is_alive(target) {
            return Ok(());
        }
        let value = if modified {
            block_calc(self.state, &self.env, target)?.compute(amount)
        } else {
            amount.max(0)
        };
        self.creature_mut(target)?.block += value;
        Ok(())
    }

    // ========================================================================
    // Statuses
    // ========================================================================

    /// Applies a status, letting Artifact negate debuff applications first.
    pub(crate) fn apply_status(
        &mut self,
        source: Option<EntityId>,
        target: EntityId,
        status: StatusId,
        amount: i32,
    ) -> Result<(), ExecuteError> {
        if amount == 0 || !self.state.is_alive(target) {
            return Ok(());
        }
        let desc = self.env.status(status)?;
        if desc.is_debuff_application(amount) {
            let outcome = self.fire(
                target,
                HookEvent::ApplyStatusModify {
                    source,
                    status,
                    amount,
                    negated: false,
                },
            )?;
            if let HookEvent::ApplyStatusModify { negated: true, .. } = outcome {
                return Ok(());
            }
        }

        let fresh = match desc.fresh_guard {
            FreshGuard::Always => true,
            FreshGuard::AfterPlayerTurn => matches!(
                self.state.phase,
                TurnPhase::EnemyTurn | TurnPhase::RoundEndHooks
            ),
            FreshGuard::Never => false,
        };
        let turn = self.state.turn;
        let change = self
            .creature_mut(target)?
            .statuses
            .apply(desc, target, amount, turn, fresh);
        if let Some(change) = change {
            self.fire(target, HookEvent::StackChanged(change))?;
        }
        Ok(())
    }

    pub(crate) fn reduce_status(
        &mut self,
        target: EntityId,
        status: StatusId,
        by: i32,
    ) -> Result<(), ExecuteError> {
        let desc = self.env.status(status)?;
        let change = self.creature_mut(target)?.statuses.reduce(desc, by);
        if let Some(change) = change {
            self.fire(target, HookEvent::StackChanged(change))?;
        }
        Ok(())
    }

    pub(crate) fn remove_status(
        &mut self,
        target: EntityId,
        status: StatusId,
    ) -> Result<(), ExecuteError> {
        let Some(removed) = self.creature_mut(target)?.statuses.remove(status) else {
            return Ok(());
        };
        let change = crate::state::StackChange {
            id: status,
            owner: target,
            before: removed.amount,
            after: 0,
            created: false,
            removed: true,
        };
        self.fire(target, HookEvent::StackChanged(change))?;
        Ok(())
    }

    /// Decay sweep for one entity at one phase boundary.
    ///
    /// Instances flagged `just_applied` survive this sweep with the flag cleared.
    /// Statuses that never decay have their flag cleared at round end.
    pub(crate) fn decay_statuses(
        &mut self,
        owner: EntityId,
        timing: DecayTiming,
    ) -> Result<(), ExecuteError> {
        let Some(ids) = self.state.creature(owner).map(|c| c.statuses.ids()) else {
            return Ok(());
        };
        for id in ids {
            let desc = self.env.status(id)?;
            let creature = self.creature_mut(owner)?;
            let Some(instance) = creature.statuses.get_mut(id) else {
                continue;
            };
            if desc.decay != timing {
                if timing == DecayTiming::RoundEnd && desc.decay == DecayTiming::None {
                    instance.just_applied = false;
                }
                continue;
            }
            if instance.just_applied {
                instance.just_applied = false;
                continue;
            }
            let by = match desc.decay_step {
                DecayStep::One => 1,
                DecayStep::All => instance.amount,
            };
            if let Some(change) = creature.statuses.reduce(desc, by) {
                self.fire(owner, HookEvent::StackChanged(change))?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Negative amounts are applied as-is; a result below zero fails the post-action
    /// invariant check.
    pub(crate) fn gain_energy(&mut self, amount: i32) {
        self.state.player.energy += amount;
    }

    pub(crate) fn heal(&mut self, target: EntityId, amount: i32) -> Result<(), ExecuteError> {
        self.creature_mut(target)?.heal(amount);
        Ok(())
    }

    pub(crate) fn lose_hp(&mut self, target: EntityId, amount: i32) -> Result<(), ExecuteError> {
        self.deal_damage(None, target, amount, DamageClass::HpLoss)?;
        Ok(())
    }

    /// Switches stance; re-entering the current stance does nothing.
    pub(crate) fn change_stance(&mut self, to: Stance) -> Result<(), ExecuteError> {
        let from = self.state.player.stance;
        if from == to {
            return Ok(());
        }
        self.state.player.stance = to;
        self.gain_energy(from.energy_on_exit() + to.energy_on_enter());
        self.fire(EntityId::PLAYER, HookEvent::StanceChange { from, to })?;
        Ok(())
    }

    // ========================================================================
    // Piles
    // ========================================================================

    /// Draws up to `count` cards, reshuffling the discard pile when the draw pile runs
    /// out. Stops early on No Draw, a full hand, or two empty piles.
    pub(crate) fn draw_cards(&mut self, count: u32) -> Result<(), ExecuteError> {
        for _ in 0..count {
            if self.state.player.creature.statuses.has(StatusId::NoDraw)
                || self.state.piles.hand.len() >= self.state.config.hand_limit
            {
                break;
            }
            if self.state.piles.draw.is_empty() {
                if self.state.piles.discard.is_empty() {
                    break;
                }
                self.reshuffle()?;
            }
            let Some(card) = self.state.piles.draw.pop() else {
                break;
            };
            let def = self.env.card(&card.id)?;
            self.state.piles.hand.push(card.clone());
            self.state.counters.cards_drawn += 1;
            if !def.on_draw.is_empty() {
                let source = EffectSource::card(def.stats(card.upgraded), card.misc, 0);
                self.resolve_effects(&source, &def.on_draw)?;
            }
        }
        Ok(())
    }

    /// Moves the discard pile under the draw pile and shuffles on the shuffle stream.
    pub(crate) fn reshuffle(&mut self) -> Result<(), ExecuteError> {
        let discard = std::mem::take(&mut self.state.piles.discard);
        self.state.piles.draw.extend(discard);
        self.state.rng.shuffle(&mut self.state.piles.draw);
        self.fire(EntityId::PLAYER, HookEvent::Shuffle)?;
        Ok(())
    }

    /// Moves a hand card to the exhaust pile and fires `Exhaust`.
    pub(crate) fn exhaust_from_hand(&mut self, uid: u32) -> Result<(), ExecuteError> {
        let piles = &mut self.state.piles;
        let Some(index) = piles.hand.iter().position(|c| c.uid == uid) else {
            return Ok(());
        };
        let card = piles.hand.remove(index);
        self.exhaust(card)
    }

    pub(crate) fn exhaust(&mut self, card: CardInstance) -> Result<(), ExecuteError> {
        let event = HookEvent::Exhaust {
            uid: card.uid,
            id: card.id.clone(),
        };
        self.state.piles.exhaust.push(card);
        self.fire(EntityId::PLAYER, event)?;
        Ok(())
    }

    pub(crate) fn discard_from_hand(&mut self, uid: u32) {
        let piles = &mut self.state.piles;
        if let Some(index) = piles.hand.iter().position(|c| c.uid == uid) {
            let card = piles.hand.remove(index);
            piles.discard.push(card);
        }
    }

    /// Creates `count` new copies of `card` in `pile`.
    ///
    /// Copies headed for a full hand land in the discard pile; copies headed for the
    /// draw pile are inserted at a random depth on the card stream.
    pub(crate) fn add_card(
        &mut self,
        card: &CardId,
        pile: PileKind,
        upgraded: bool,
        count: u32,
    ) -> Result<(), ExecuteError> {
        let def = self.env.card(card)?;
        let cost = def.stats(upgraded).cost;
        for _ in 0..count {
            let instance = CardInstance {
                uid: self.state.allocate_uid(),
                id: card.clone(),
                upgraded,
                cost,
                misc: 0,
            };
            let hand_full = self.state.piles.hand.len() >= self.state.config.hand_limit;
            match pile {
                PileKind::Hand if hand_full => self.state.piles.discard.push(instance),
                PileKind::Draw => {
                    let len = self.state.piles.draw.len() as u32;
                    let at = self.state.rng.draw(StreamName::CardRandom, len + 1) as usize;
                    self.state.piles.draw.insert(at, instance);
                }
                PileKind::Exhaust => self.exhaust(instance)?,
                other => self.state.piles.pile_mut(other).push(instance),
            }
        }
        Ok(())
    }
}
