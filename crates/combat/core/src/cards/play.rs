//! Validation and execution of player actions against the piles.
//!
//! [`check`] runs on the authoritative state and never mutates it; the `ExecContext`
//! methods below run on the working copy only after `check` accepted the action.

use std::collections::BTreeSet;

use super::effects::EffectSource;
use super::selection_for;
use crate::action::{Action, ActionError, SelectionKind, SelectionRequest};
use crate::engine::{ExecContext, ExecuteError};
use crate::env::{CardDefinition, CardFlags, CardTarget, CardType, CombatEnv};
use crate::hooks::{HookEvent, PlayedCard};
use crate::state::{CombatState, EntityId, PotionId, StatusId, TurnPhase};

/// An action whose parameters have been checked against the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    PlayCard {
        hand_index: usize,
        target: Option<EntityId>,
        choices: Vec<usize>,
    },
    UsePotion {
        slot: usize,
        target: Option<EntityId>,
    },
    DiscardPotion {
        slot: usize,
    },
    EndTurn,
}

/// Result of checking an action.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Checked {
    Ready(Plan),
    NeedsInput(SelectionRequest),
}

/// Checks an action without mutating anything.
pub(crate) fn check(
    state: &CombatState,
    env: &CombatEnv<'_>,
    action: &Action,
) -> Result<Checked, ExecuteError> {
    if state.phase.is_terminal() {
        return Err(ActionError::CombatOver.into());
    }
    if !state.phase.accepts_actions() {
        return Err(ActionError::WrongPhase { phase: state.phase }.into());
    }

    match action {
        Action::PlayCard {
            hand_index,
            target,
            choices,
        } => {
            let def = check_card(state, env, *hand_index)?;
            let target = match check_target(state, def.target, *target)? {
                TargetCheck::Enemy(id) => Some(id),
                TargetCheck::Untargeted => None,
                TargetCheck::Missing(options) => {
                    return Ok(Checked::NeedsInput(SelectionRequest {
                        action: action.clone(),
                        kind: SelectionKind::Target,
                        options,
                    }));
                }
            };
            let remaining = state.piles.hand.len() - 1;
            match selection_for(&def.effects) {
                None if !choices.is_empty() => Err(ActionError::UnexpectedChoices.into()),
                None => Ok(Checked::Ready(Plan::PlayCard {
                    hand_index: *hand_index,
                    target,
                    choices: Vec::new(),
                })),
                Some(kind) => {
                    let (wanted, kind) = match kind {
                        SelectionKind::Discard { count } => {
                            let count = count.min(remaining);
                            (count, SelectionKind::Discard { count })
                        }
                        SelectionKind::Exhaust { count } => {
                            let count = count.min(remaining);
                            (count, SelectionKind::Exhaust { count })
                        }
                        SelectionKind::Target => (0, SelectionKind::Target),
                    };
                    if wanted > 0 && choices.is_empty() {
                        return Ok(Checked::NeedsInput(SelectionRequest {
                            action: action.clone(),
                            kind,
                            options: (0..remaining).collect(),
                        }));
                    }
                    check_choices(choices, wanted, remaining)?;
                    Ok(Checked::Ready(Plan::PlayCard {
                        hand_index: *hand_index,
                        target,
                        choices: choices.clone(),
                    }))
                }
            }
        }
        Action::UsePotion { slot, target } => {
            let id = potion_in(state, *slot)?;
            let def = env.potion(id)?;
            let target = match check_target(state, def.target, *target)? {
                TargetCheck::Enemy(id) => Some(id),
                TargetCheck::Untargeted => None,
                TargetCheck::Missing(options) => {
                    return Ok(Checked::NeedsInput(SelectionRequest {
                        action: action.clone(),
                        kind: SelectionKind::Target,
                        options,
                    }));
                }
            };
            Ok(Checked::Ready(Plan::UsePotion {
                slot: *slot,
                target,
            }))
        }
        Action::DiscardPotion { slot } => {
            potion_in(state, *slot)?;
            Ok(Checked::Ready(Plan::DiscardPotion { slot: *slot }))
        }
        Action::EndTurn => Ok(Checked::Ready(Plan::EndTurn)),
    }
}

/// Checks that the card at `hand_index` can be played right now.
pub(crate) fn check_card<'e>(
    state: &CombatState,
    env: &CombatEnv<'e>,
    hand_index: usize,
) -> Result<&'e CardDefinition, ExecuteError> {
    let hand = &state.piles.hand;
    let card = hand
        .get(hand_index)
        .ok_or(ActionError::HandIndexOutOfRange {
            index: hand_index,
            hand_size: hand.len(),
        })?;
    let def = env.card(&card.id)?;
    if def.is_unplayable(card.upgraded) || card.cost == CardDefinition::UNPLAYABLE_COST {
        return Err(ActionError::CardUnplayable {
            card: card.label(),
        }
        .into());
    }
    if def.card_type == CardType::Attack
        && state.player.creature.statuses.has(StatusId::Entangled)
    {
        return Err(ActionError::Entangled.into());
    }
    if card.cost > state.player.energy {
        return Err(ActionError::NotEnoughEnergy {
            card: card.label(),
            cost: card.cost,
            energy: state.player.energy,
        }
        .into());
    }
    Ok(def)
}

/// Outcome of matching a supplied target against what a card or potion wants.
enum TargetCheck {
    Untargeted,
    Enemy(EntityId),
    /// A target is required but missing; carries the valid enemy indices.
    Missing(Vec<usize>),
}

fn check_target(
    state: &CombatState,
    wanted: CardTarget,
    target: Option<usize>,
) -> Result<TargetCheck, ActionError> {
    match (wanted, target) {
        (CardTarget::Enemy, None) => Ok(TargetCheck::Missing(living_indices(state))),
        (CardTarget::Enemy, Some(index)) => {
            let id = EntityId::enemy(index);
            if index < state.enemies.len() && state.is_alive(id) {
                Ok(TargetCheck::Enemy(id))
            } else {
                Err(ActionError::InvalidTarget { target: index })
            }
        }
        (_, Some(_)) => Err(ActionError::UnexpectedTarget),
        (_, None) => Ok(TargetCheck::Untargeted),
    }
}

fn check_choices(choices: &[usize], wanted: usize, remaining: usize) -> Result<(), ActionError> {
    if choices.len() != wanted {
        return Err(ActionError::WrongChoiceCount {
            expected: wanted,
            got: choices.len(),
        });
    }
    let mut seen = BTreeSet::new();
    for &index in choices {
        if index >= remaining {
            return Err(ActionError::InvalidChoice { index });
        }
        if !seen.insert(index) {
            return Err(ActionError::DuplicateChoice { index });
        }
    }
    Ok(())
}

fn potion_in(state: &CombatState, slot: usize) -> Result<&PotionId, ActionError> {
    match state.potions.get(slot) {
        None => Err(ActionError::PotionSlotOutOfRange { slot }),
        Some(None) => Err(ActionError::PotionSlotEmpty { slot }),
        Some(Some(id)) => Ok(id),
    }
}

pub(crate) fn living_indices(state: &CombatState) -> Vec<usize> {
    state
        .living_enemies()
        .into_iter()
        .filter_map(EntityId::enemy_index)
        .collect()
}

impl ExecContext<'_, '_> {
    /// Executes a checked plan.
    pub(crate) fn execute_plan(&mut self, plan: Plan) -> Result<(), ExecuteError> {
        match plan {
            Plan::PlayCard {
                hand_index,
                target,
                choices,
            } => self.play_card(hand_index, target, &choices),
            Plan::UsePotion { slot, target } => self.use_potion(slot, target),
            Plan::DiscardPotion { slot } => {
                if let Some(entry) = self.state.potions.get_mut(slot) {
                    *entry = None;
                }
                Ok(())
            }
            Plan::EndTurn => {
                self.state.phase = TurnPhase::EndTurnHooksPreDiscard;
                Ok(())
            }
        }
    }

    /// validate (done) -> pay -> `CardPlayed` -> effects -> `AfterCardPlayed` -> move.
    fn play_card(
        &mut self,
        hand_index: usize,
        target: Option<EntityId>,
        choices: &[usize],
    ) -> Result<(), ExecuteError> {
        let card = self.state.piles.hand.remove(hand_index);
        let def = self.env.card(&card.id)?;
        let stats = def.stats(card.upgraded);

        let spent = if card.cost == CardDefinition::X_COST {
            self.state.player.energy
        } else {
            card.cost.max(0)
        };
        self.state.player.energy -= spent;

        let chosen = choices
            .iter()
            .filter_map(|&i| self.state.piles.hand.get(i).map(|c| c.uid))
            .collect();

        let counters = &mut self.state.counters;
        counters.cards_played += 1;
        match def.card_type {
            CardType::Attack => counters.attacks_played += 1,
            CardType::Skill => counters.skills_played += 1,
            CardType::Power => counters.powers_played += 1,
            CardType::Status | CardType::Curse => {}
        }

        let played = PlayedCard {
            uid: card.uid,
            id: card.id.clone(),
            card_type: def.card_type,
            target,
        };
        let source = EffectSource::card(stats, card.misc, spent)
            .with_target(target)
            .with_chosen(chosen);
        self.limbo = Some(card);

        self.batch(|ctx| ctx.fire_everyone(HookEvent::CardPlayed(played.clone())))?;
        self.resolve_effects(&source, &def.effects)?;
        self.fire(EntityId::PLAYER, HookEvent::AfterCardPlayed(played))?;

        let Some(card) = self.limbo.take() else {
            return Ok(());
        };
        if def.card_type == CardType::Power {
            return Ok(());
        }
        if stats.flags.contains(CardFlags::EXHAUST) {
            self.exhaust(card)
        } else {
            self.state.piles.discard.push(card);
            Ok(())
        }
    }

    fn use_potion(&mut self, slot: usize, target: Option<EntityId>) -> Result<(), ExecuteError> {
        let Some(id) = self.state.potions.get_mut(slot).and_then(Option::take) else {
            return Ok(());
        };
        let def = self.env.potion(&id)?;
        let source = EffectSource::potion().with_target(target);
        self.resolve_effects(&source, &def.effects)
    }
}
