//! Enumeration of the actions accepted in the current state.

use super::play::{check_card, living_indices};
use crate::action::Action;
use crate::engine::ExecuteError;
use crate::env::{CardTarget, CombatEnv, OracleError};
use crate::state::CombatState;

/// Every action the engine would accept right now, in a stable order: card plays by
/// hand index (one per living target for targeted cards), potion uses, potion
/// discards, then `EndTurn`.
///
/// Cards that ask for hand choices are listed without choices; executing them yields a
/// selection request.
pub fn available_actions(
    state: &CombatState,
    env: &CombatEnv<'_>,
) -> Result<Vec<Action>, OracleError> {
    let mut actions = Vec::new();
    if !state.phase.accepts_actions() {
        return Ok(actions);
    }
    let targets = living_indices(state);

    for hand_index in 0..state.piles.hand.len() {
        let def = match check_card(state, env, hand_index) {
            Ok(def) => def,
            Err(ExecuteError::Content(miss)) => return Err(miss),
            Err(_) => continue,
        };
        if def.target == CardTarget::Enemy {
            actions.extend(targets.iter().map(|&t| Action::play_at(hand_index, t)));
        } else {
            actions.push(Action::play(hand_index));
        }
    }

    for (slot, potion) in state.potions.iter().enumerate() {
        let Some(id) = potion else { continue };
        if env.potion(id)?.target == CardTarget::Enemy {
            actions.extend(targets.iter().map(|&t| Action::UsePotion {
                slot,
                target: Some(t),
            }));
        } else {
            actions.push(Action::UsePotion { slot, target: None });
        }
    }
    for (slot, potion) in state.potions.iter().enumerate() {
        if potion.is_some() {
            actions.push(Action::DiscardPotion { slot });
        }
    }

    actions.push(Action::EndTurn);
    Ok(actions)
}
