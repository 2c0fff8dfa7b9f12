//! Automatic turn phases.
//!
//! After setup and after every accepted action the engine runs phases until it
//! settles in `PlayerActionLoop` or `CombatEnd`. Each phase is one method; the
//! sequence itself is [`TurnPhase::successor`].

use super::{ExecContext, ExecuteError, InvariantViolation};
use crate::cards::effects::EffectSource;
use crate::env::{CardFlags, DecayTiming};
use crate::hooks::HookEvent;
use crate::state::{
    CombatOutcome, EntityId, RelicId, Stance, StatusId, TurnCounters, TurnPhase,
};

const PLAYER: EntityId = EntityId::PLAYER;

impl ExecContext<'_, '_> {
    /// Runs phases until the engine can accept an action or the combat is over.
    pub(crate) fn advance(&mut self) -> Result<(), ExecuteError> {
        loop {
            if self.state.phase.is_terminal() {
                return Ok(());
            }
            if let Some(outcome) = self.decided_outcome() {
                return self.end_combat(outcome);
            }
            let phase = self.state.phase;
            match phase {
                TurnPhase::PlayerActionLoop => return Ok(()),
                TurnPhase::TurnStart => self.turn_start()?,
                TurnPhase::Draw => self.draw_phase()?,
                TurnPhase::PostDrawHooks => {
                    self.fire(PLAYER, HookEvent::PostDraw)?;
                }
                TurnPhase::EndTurnHooksPreDiscard => self.end_turn_pre_discard()?,
                TurnPhase::Discard => self.discard_hand()?,
                TurnPhase::EndTurnHooksPostDiscard => self.end_turn_post_discard()?,
                TurnPhase::EnemyTurn => self.enemy_turn()?,
                TurnPhase::RoundEndHooks => self.round_end()?,
                TurnPhase::CombatEnd => return Ok(()),
            }
            if self.state.phase == phase {
                self.state.phase = phase.successor();
            }
        }
    }

    /// Defeat wins ties: a player killed by the blow that kills the last enemy loses.
    pub(crate) fn decided_outcome(&self) -> Option<CombatOutcome> {
        if self.state.player.creature.is_dead() {
            Some(CombatOutcome::Defeat)
        } else if self.state.enemies.iter().all(|e| !e.is_alive()) {
            Some(CombatOutcome::Victory)
        } else {
            None
        }
    }

    /// Enters `CombatEnd` and fires the terminal hook exactly once.
    pub(crate) fn end_combat(&mut self, outcome: CombatOutcome) -> Result<(), ExecuteError> {
        if self.state.phase.is_terminal() {
            return Err(InvariantViolation::CombatEndReentered.into());
        }
        self.state.phase = TurnPhase::CombatEnd;
        self.state.outcome = Some(outcome);
        let event = match outcome {
            CombatOutcome::Victory => HookEvent::Victory,
            CombatOutcome::Defeat => HookEvent::Defeat,
        };
        self.fire(PLAYER, event)?;
        Ok(())
    }

    // ========================================================================
    // Player turn
    // ========================================================================

    fn turn_start(&mut self) -> Result<(), ExecuteError> {
        let state = &mut *self.state;
        state.turn += 1;
        state.last_turn_attacks = state.counters.attacks_played;
        state.counters = TurnCounters::default();

        let statuses = &state.player.creature.statuses;
        if !statuses.has(StatusId::Barricade) && !statuses.has(StatusId::Blur) {
            state.player.creature.block = 0;
        }

        let carried = if state.has_relic(RelicId::IceCream) {
            state.player.energy
        } else {
            0
        };
        state.player.energy = state.player.energy_per_turn + carried;
        let energized = state.player.creature.statuses.amount(StatusId::Energized);
        if energized > 0 {
            self.gain_energy(energized);
            self.remove_status(PLAYER, StatusId::Energized)?;
        }

        if self.state.player.stance == Stance::Divinity {
            self.change_stance(Stance::Neutral)?;
        }
        self.fire(PLAYER, HookEvent::TurnStart)?;
        Ok(())
    }

    fn draw_phase(&mut self) -> Result<(), ExecuteError> {
        let bonus = self
            .state
            .player
            .creature
            .statuses
            .amount(StatusId::DrawCardNextTurn);
        if bonus > 0 {
            self.remove_status(PLAYER, StatusId::DrawCardNextTurn)?;
        }
        let count = self.state.config.draw_per_turn + bonus.max(0) as u32;
        self.batch(|ctx| ctx.draw_cards(count))
    }

    /// `TurnEnd` hooks, then end-of-turn card effects in hand order, then ethereal
    /// cards exhaust.
    fn end_turn_pre_discard(&mut self) -> Result<(), ExecuteError> {
        self.fire(PLAYER, HookEvent::TurnEnd)?;

        let in_hand: Vec<_> = self.state.piles.hand.clone();
        for card in &in_hand {
            let def = self.env.card(&card.id)?;
            if !def.end_of_turn.is_empty() {
                let source = EffectSource::card(def.stats(card.upgraded), card.misc, 0);
                self.resolve_effects(&source, &def.end_of_turn)?;
            }
        }

        for card in in_hand {
            let def = self.env.card(&card.id)?;
            if def.stats(card.upgraded).flags.contains(CardFlags::ETHEREAL) {
                self.exhaust_from_hand(card.uid)?;
            }
        }
        Ok(())
    }

    /// Retained cards stay; Runic Pyramid and Equilibrium keep the whole hand.
    fn discard_hand(&mut self) -> Result<(), ExecuteError> {
        if self.state.has_relic(RelicId::RunicPyramid)
            || self.state.player.creature.statuses.has(StatusId::Equilibrium)
        {
            return Ok(());
        }
        let hand = std::mem::take(&mut self.state.piles.hand);
        for card in hand {
            let def = self.env.card(&card.id)?;
            if def.stats(card.upgraded).flags.contains(CardFlags::RETAIN) {
                self.state.piles.hand.push(card);
            } else {
                self.state.piles.discard.push(card);
            }
        }
        Ok(())
    }

    fn end_turn_post_discard(&mut self) -> Result<(), ExecuteError> {
        self.fire(PLAYER, HookEvent::TurnEndPostDiscard)?;
        self.batch(|ctx| ctx.decay_statuses(PLAYER, DecayTiming::TurnEnd))
    }

    // ========================================================================
    // Enemy turn and round end
    // ========================================================================

    /// Each living enemy in encounter order: lose block, turn-start hooks, move,
    /// turn-end hooks and decay, next intent. Stops as soon as the player dies.
    fn enemy_turn(&mut self) -> Result<(), ExecuteError> {
        for index in 0..self.state.enemies.len() {
            if self.state.player.creature.is_dead() {
                break;
            }
            let id = EntityId::enemy(index);
            if !self.state.is_alive(id) {
                continue;
            }
            let creature = self.creature_mut(id)?;
            if !creature.statuses.has(StatusId::Barricade) {
                creature.block = 0;
            }
            self.fire(id, HookEvent::TurnStart)?;
            if !self.state.is_alive(id) {
                continue;
            }
            self.take_move(index)?;
            if !self.state.is_alive(id) {
                continue;
            }
            self.fire(id, HookEvent::TurnEnd)?;
            self.batch(|ctx| ctx.decay_statuses(id, DecayTiming::TurnEnd))?;
            self.roll_intent(index)?;
        }
        Ok(())
    }

    fn round_end(&mut self) -> Result<(), ExecuteError> {
        self.batch(|ctx| ctx.fire_everyone(HookEvent::RoundEnd))?;
        let ids: Vec<_> = self.state.entity_ids().collect();
        self.batch(|ctx| {
            for id in ids {
                if ctx.state.is_alive(id) {
                    ctx.decay_statuses(id, DecayTiming::RoundEnd)?;
                }
            }
            Ok(())
        })
    }
}
