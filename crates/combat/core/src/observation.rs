//! Observation API.
//!
//! An [`Observation`] is a phase-independent projection of [`CombatState`]: every
//! field is present in every phase, with `null`/empty values where nothing applies,
//! so reference comparisons never trip over fields that come and go.

use std::collections::BTreeMap;

use crate::action::Action;
use crate::cards::available_actions;
use crate::combat::preview_damage;
use crate::env::{CombatEnv, IntentKind, OracleError};
use crate::state::{
    CombatOutcome, CombatState, Creature, EnemyId, EntityId, PileKind, PotionId, RelicId,
    Stance, StatusId, TurnPhase,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusView {
    pub id: StatusId,
    pub amount: i32,
    pub just_applied: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub energy: i32,
    pub stance: Stance,
    pub statuses: Vec<StatusView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentView {
    pub move_id: u8,
    pub name: String,
    pub kind: IntentKind,
    /// Per-hit damage after every current modifier, as displayed.
    pub damage: Option<i32>,
    pub hits: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyView {
    pub index: usize,
    pub id: EnemyId,
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub alive: bool,
    pub statuses: Vec<StatusView>,
    pub intent: Option<IntentView>,
}

/// Piles as card labels (`id`, `id+` when upgraded). The draw pile lists its top card
/// last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PilesView {
    pub draw: Vec<String>,
    pub hand: Vec<String>,
    pub discard: Vec<String>,
    pub exhaust: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicView {
    pub id: RelicId,
    pub counter: i32,
}

/// Structured snapshot returned after every action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub phase: TurnPhase,
    pub turn: u32,
    pub outcome: Option<CombatOutcome>,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub piles: PilesView,
    pub potions: Vec<Option<PotionId>>,
    pub relics: Vec<RelicView>,
    pub available_actions: Vec<Action>,
    /// RNG counters by stream name.
    pub rng: BTreeMap<String, u64>,
}

impl Observation {
    /// Projects `state`.
    ///
    /// # Errors
    ///
    /// Fails only when content needed for intents or available actions is missing.
    pub fn from_state(state: &CombatState, env: &CombatEnv<'_>) -> Result<Self, OracleError> {
        let player = &state.player;
        let mut enemies = Vec::with_capacity(state.enemies.len());
        for (index, enemy) in state.enemies.iter().enumerate() {
            let intent = match enemy.intent {
                Some(intent) if enemy.is_alive() => {
                    let def = env.enemy(&enemy.enemy)?;
                    let mv = def
                        .move_def(intent.move_id)
                        .ok_or_else(|| OracleError::MoveNotFound {
                            enemy: enemy.enemy.clone(),
                            move_id: intent.move_id,
                        })?;
                    let damage = match mv.damage {
                        Some(base) => Some(preview_damage(
                            state,
                            env,
                            EntityId::enemy(index),
                            Some(EntityId::PLAYER),
                            base,
                        )?),
                        None => None,
                    };
                    Some(IntentView {
                        move_id: mv.id,
                        name: mv.name.clone(),
                        kind: mv.intent,
                        damage,
                        hits: mv.hits,
                    })
                }
                _ => None,
            };
            enemies.push(EnemyView {
                index,
                id: enemy.enemy.clone(),
                hp: enemy.creature.hp,
                max_hp: enemy.creature.max_hp,
                block: enemy.creature.block,
                alive: enemy.is_alive(),
                statuses: statuses(&enemy.creature),
                intent,
            });
        }

        Ok(Self {
            phase: state.phase,
            turn: state.turn,
            outcome: state.outcome,
            player: PlayerView {
                hp: player.creature.hp,
                max_hp: player.creature.max_hp,
                block: player.creature.block,
                energy: player.energy,
                stance: player.stance,
                statuses: statuses(&player.creature),
            },
            enemies,
            piles: PilesView {
                draw: state.piles.labels(PileKind::Draw),
                hand: state.piles.labels(PileKind::Hand),
                discard: state.piles.labels(PileKind::Discard),
                exhaust: state.piles.labels(PileKind::Exhaust),
            },
            potions: state.potions.iter().cloned().collect(),
            relics: state
                .relics
                .iter()
                .map(|r| RelicView {
                    id: r.id,
                    counter: r.counter,
                })
                .collect(),
            available_actions: available_actions(state, env)?,
            rng: state.rng.counter_map(),
        })
    }
}

fn statuses(creature: &Creature) -> Vec<StatusView> {
    creature
        .statuses
        .iter()
        .map(|s| StatusView {
            id: s.id,
            amount: s.amount,
            just_applied: s.just_applied,
        })
        .collect()
}
