//! Post-action state checks. A failure here is an engine or content defect; nothing
//! is clamped or repaired.

use std::collections::BTreeSet;

use super::{ExecuteError, InvariantViolation};
use crate::env::CombatEnv;
use crate::state::{CombatState, TurnPhase};

/// Verifies every structural invariant of a settled state.
pub(crate) fn check(state: &CombatState, env: &CombatEnv<'_>) -> Result<(), ExecuteError> {
    for entity in state.entity_ids() {
        let creature = state
            .creature(entity)
            .ok_or(InvariantViolation::MissingEntity(entity))?;
        if creature.hp < 0 || creature.hp > creature.max_hp {
            return Err(InvariantViolation::HpOutOfRange {
                entity,
                hp: creature.hp,
                max_hp: creature.max_hp,
            }
            .into());
        }
        if creature.block < 0 {
            return Err(InvariantViolation::NegativeBlock {
                entity,
                block: creature.block,
            }
            .into());
        }
        let mut seen = BTreeSet::new();
        for status in creature.statuses.iter() {
            if !seen.insert(status.id) {
                return Err(InvariantViolation::DuplicateStatus {
                    entity,
                    status: status.id,
                }
                .into());
            }
            if env.status(status.id)?.should_remove(status.amount) {
                return Err(InvariantViolation::StaleStatus {
                    entity,
                    status: status.id,
                    amount: status.amount,
                }
                .into());
            }
        }
    }

    if state.piles.hand.len() > state.config.hand_limit {
        return Err(InvariantViolation::HandOverflow {
            size: state.piles.hand.len(),
            limit: state.config.hand_limit,
        }
        .into());
    }

    let mut uids = BTreeSet::new();
    let piles = &state.piles;
    for card in piles
        .draw
        .iter()
        .chain(&piles.hand)
        .chain(&piles.discard)
        .chain(&piles.exhaust)
    {
        if !uids.insert(card.uid) {
            return Err(InvariantViolation::DuplicateCard { uid: card.uid }.into());
        }
    }

    if state.player.energy < 0 {
        return Err(InvariantViolation::NegativeEnergy {
            energy: state.player.energy,
        }
        .into());
    }

    if !matches!(
        state.phase,
        TurnPhase::PlayerActionLoop | TurnPhase::CombatEnd
    ) {
        return Err(InvariantViolation::UnsettledPhase { phase: state.phase }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;
    use crate::state::{EntityId, StatusId};

    #[test]
    fn fresh_combat_passes() {
        let content = testkit::content();
        let env = CombatEnv::from_snapshot(&content);
        let engine = testkit::engine(&content);
        check(engine.state(), &env).unwrap();
    }

    #[test]
    fn hp_above_max_is_reported_not_clamped() {
        let content = testkit::content();
        let env = CombatEnv::from_snapshot(&content);
        let mut state = testkit::engine(&content).state().clone();
        state.player.creature.hp = state.player.creature.max_hp + 1;
        let err = check(&state, &env).unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::Invariant(ref e)
                if matches!(e.error, InvariantViolation::HpOutOfRange { entity: EntityId::PLAYER, .. })
        ));
        assert_eq!(state.player.creature.hp, state.player.creature.max_hp + 1);
    }

    #[test]
    fn status_left_at_zero_is_stale() {
        let content = testkit::content();
        let env = CombatEnv::from_snapshot(&content);
        let mut state = testkit::engine(&content).state().clone();
        let weak = testkit::status(StatusId::Weak);
        state
            .player
            .creature
            .statuses
            .apply(&weak, EntityId::PLAYER, 1, 1, false);
        state
            .player
            .creature
            .statuses
            .get_mut(StatusId::Weak)
            .unwrap()
            .amount = 0;
        assert!(matches!(
            check(&state, &env),
            Err(ExecuteError::Invariant(ref e))
                if matches!(e.error, InvariantViolation::StaleStatus { .. })
        ));
    }

    #[test]
    fn duplicate_card_uid_is_reported() {
        let content = testkit::content();
        let env = CombatEnv::from_snapshot(&content);
        let mut state = testkit::engine(&content).state().clone();
        let card = state.piles.hand[0].clone();
        state.piles.discard.push(card);
        assert!(matches!(
            check(&state, &env),
            Err(ExecuteError::Invariant(ref e))
                if matches!(e.error, InvariantViolation::DuplicateCard { .. })
        ));
    }
}
