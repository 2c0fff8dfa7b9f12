//! Enemy moves and intent rolls.

use super::{ExecContext, ExecuteError, InvariantViolation};
use crate::combat::DamageClass;
use crate::env::{EnemyDefinition, MoveDefinition, MoveEffect, MoveTarget, OracleError};
use crate::rng::StreamName;
use crate::state::{EntityId, Intent};

/// Bound of the roll handed to AI patterns.
pub const AI_ROLL_BOUND: u32 = 100;

impl ExecContext<'_, '_> {
    /// Executes the intended move of the enemy at `index`: every hit, then block,
    /// then effects in declared order.
    pub(crate) fn take_move(&mut self, index: usize) -> Result<(), ExecuteError> {
        let id = EntityId::enemy(index);
        let enemy = self
            .state
            .enemies
            .get(index)
            .ok_or(InvariantViolation::MissingEntity(id))?;
        let Some(intent) = enemy.intent else {
            return Ok(());
        };
        let def = self.env.enemy(&enemy.enemy)?;
        let mv = move_def(def, intent.move_id)?;

        if let Some(damage) = mv.damage {
            for _ in 0..mv.hits {
                if !self.state.is_alive(id) || self.state.player.creature.is_dead() {
                    break;
                }
                self.deal_damage(Some(id), EntityId::PLAYER, damage, DamageClass::Normal)?;
            }
        }
        if mv.block > 0 {
            self.gain_block(id, mv.block, true)?;
        }
        for effect in &mv.effects {
            self.batch(|ctx| ctx.move_effect(id, effect))?;
        }

        if let Some(enemy) = self.state.enemies.get_mut(index) {
            enemy.remember(intent.move_id);
        }
        Ok(())
    }

    fn move_effect(&mut self, id: EntityId, effect: &MoveEffect) -> Result<(), ExecuteError> {
        match effect {
            MoveEffect::ApplyStatus {
                status,
                amount,
                target,
            } => {
                let targets = match target {
                    MoveTarget::Player => vec![EntityId::PLAYER],
                    MoveTarget::Itself => vec![id],
                    MoveTarget::AllEnemies => self.state.living_enemies(),
                };
                for target in targets {
                    self.apply_status(Some(id), target, *status, *amount)?;
                }
            }
            MoveEffect::AddCard { card, pile, count } => {
                self.add_card(card, *pile, false, *count)?;
            }
            MoveEffect::Heal { amount } => self.heal(id, *amount)?,
        }
        Ok(())
    }

    /// Picks the next intent with exactly one `ai` draw.
    pub(crate) fn roll_intent(&mut self, index: usize) -> Result<(), ExecuteError> {
        let id = EntityId::enemy(index);
        let enemy = self
            .state
            .enemies
            .get(index)
            .ok_or(InvariantViolation::MissingEntity(id))?;
        let def = self.env.enemy(&enemy.enemy)?;
        let (moves_taken, history) = (enemy.moves_taken, enemy.history.clone());

        let roll = self.state.rng.draw(StreamName::Ai, AI_ROLL_BOUND);
        let next = def.ai.pick(roll, moves_taken, &history);
        if let Some(move_id) = next {
            move_def(def, move_id)?;
        }
        if let Some(enemy) = self.state.enemies.get_mut(index) {
            enemy.intent = next.map(|move_id| Intent { move_id });
        }
        Ok(())
    }
}

pub(crate) fn move_def(
    def: &EnemyDefinition,
    move_id: u8,
) -> Result<&MoveDefinition, OracleError> {
    def.move_def(move_id).ok_or_else(|| OracleError::MoveNotFound {
        enemy: def.id.clone(),
        move_id,
    })
}
