//! Combat orchestrator.
//!
//! [`CombatEngine`] owns the authoritative [`CombatState`] and is its only writer.
//! Every action runs through the same pipeline:
//!
//! 1. **check** against the authoritative state (no mutation, may ask for input),
//! 2. **apply** to a by-value copy, including every cascading hook and the automatic
//!    phases that follow,
//! 3. **post-validate** the copy's invariants,
//! 4. **commit** by replacing the authoritative state.
//!
//! A failure at any step leaves the authoritative state untouched.
mod context;
mod enemy;
mod errors;
mod invariants;
mod ops;
mod phases;
#[cfg(test)]
mod tests;

pub(crate) use context::ExecContext;
pub use enemy::AI_ROLL_BOUND;
pub use errors::{
    ErrorKind, ExecuteError, InvariantViolation, TransitionPhase, TransitionPhaseError,
};

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::action::{Action, ActionOutcome};
use crate::cards::play::{self, Checked};
use crate::config::CombatConfig;
use crate::env::{CardFlags, CombatEnv};
use crate::hooks::{FiredHook, HookEvent};
use crate::observation::Observation;
use crate::rng::{RngStreams, Seed, StreamName};
use crate::state::{
    CardId, CardInstance, CombatState, Creature, EnemyEntity, EnemyId, EntityId, Piles,
    PlayerEntity, PotionId, RelicId, RelicState, Stance, StatusId, TurnCounters, TurnPhase,
};

// ============================================================================
// Setup
// ============================================================================

/// One card of the starting deck.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSpec {
    pub id: CardId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub misc: i32,
}

impl CardSpec {
    pub fn new(id: &str) -> Self {
        Self {
            id: CardId::from(id),
            upgraded: false,
            misc: 0,
        }
    }

    pub fn upgraded(mut self) -> Self {
        self.upgraded = true;
        self
    }
}

/// A relic carried into the combat with its persistent counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicSpec {
    pub id: RelicId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub counter: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSetup {
    pub hp: i32,
    pub max_hp: i32,
    pub deck: Vec<CardSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relics: Vec<RelicSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub potions: Vec<PotionId>,
    /// Overrides `CombatConfig::base_energy`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_per_turn: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySetup {
    pub id: EnemyId,
    /// Fixed hp; rolled on the `monster_hp` stream when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<i32>,
}

impl EnemySetup {
    pub fn new(id: &str) -> Self {
        Self {
            id: EnemyId::from(id),
            hp: None,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }
}

/// Everything needed to start one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSetup {
    pub seed: Seed,
    #[cfg_attr(feature = "serde", serde(default))]
    pub floor: u32,
    pub player: PlayerSetup,
    pub enemies: Vec<EnemySetup>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: CombatConfig,
}

// ============================================================================
// Engine
// ============================================================================

/// The combat orchestrator.
#[derive(Clone, Debug)]
pub struct CombatEngine {
    state: CombatState,
    trace_hooks: bool,
    last_trace: Vec<FiredHook>,
}

impl CombatEngine {
    /// Builds the initial state and runs the opening phases up to the first player
    /// decision.
    ///
    /// Order: content validation, enemy hp rolls (`monster_hp`), deck shuffle
    /// (`shuffle`, innate cards then moved on top), starting statuses, `CombatStart`
    /// hooks, first intents (`ai`), then turn 1.
    ///
    /// # Errors
    ///
    /// Content misses for any id in the setup, undeclared hooks, or a malformed setup.
    pub fn start(setup: &CombatSetup, env: CombatEnv<'_>) -> Result<Self, ExecuteError> {
        let known_statuses = StatusId::iter().filter(|id| env.status(*id).is_ok());
        env.validate_hooks(known_statuses, setup.player.relics.iter().map(|r| r.id))?;
        check_setup(setup)?;

        let config = setup.config.clone();
        let mut rng = RngStreams::new(setup.seed, setup.floor);

        let mut enemies = Vec::with_capacity(setup.enemies.len());
        for spec in &setup.enemies {
            let def = env.enemy(&spec.id)?;
            let hp = match spec.hp {
                Some(hp) => hp,
                None => rng.range(StreamName::MonsterHp, def.hp_min, def.hp_max),
            };
            enemies.push(EnemyEntity::new(spec.id.clone(), hp));
        }

        let mut draw = Vec::with_capacity(setup.player.deck.len());
        let mut innate = Vec::new();
        for (uid, spec) in setup.player.deck.iter().enumerate() {
            let def = env.card(&spec.id)?;
            let stats = def.stats(spec.upgraded);
            draw.push(CardInstance {
                uid: uid as u32,
                id: spec.id.clone(),
                upgraded: spec.upgraded,
                cost: stats.cost,
                misc: spec.misc,
            });
            if stats.flags.contains(CardFlags::INNATE) {
                innate.push(uid as u32);
            }
        }
        rng.shuffle(&mut draw);
        // Innate cards keep their shuffled relative order and end up on top.
        draw.sort_by_key(|card| innate.contains(&card.uid));

        let mut relics = Vec::with_capacity(setup.player.relics.len());
        for spec in &setup.player.relics {
            env.relic(spec.id)?;
            relics.push(RelicState::new(spec.id).with_counter(spec.counter));
        }

        let mut potions = ArrayVec::new();
        let slots = config.potion_slots.min(CombatConfig::MAX_POTION_SLOTS);
        for slot in 0..slots {
            let potion = setup.player.potions.get(slot).cloned();
            if let Some(id) = &potion {
                env.potion(id)?;
            }
            potions.push(potion);
        }

        let energy_per_turn = setup.player.energy_per_turn.unwrap_or(config.base_energy);
        let mut state = CombatState {
            turn: 0,
            phase: TurnPhase::TurnStart,
            outcome: None,
            player: PlayerEntity {
                creature: Creature::new(setup.player.hp, setup.player.max_hp),
                energy: 0,
                energy_per_turn,
                stance: Stance::Neutral,
            },
            enemies,
            piles: Piles {
                draw,
                ..Piles::default()
            },
            relics,
            potions,
            rng,
            counters: TurnCounters::default(),
            last_turn_attacks: 0,
            next_card_uid: setup.player.deck.len() as u32,
            actions_applied: 0,
            config,
        };

        let mut ctx = ExecContext::new(&mut state, env, false);
        for index in 0..ctx.state.enemies.len() {
            let id = EntityId::enemy(index);
            let def = env.enemy(&ctx.state.enemies[index].enemy)?;
            for start in &def.statuses {
                ctx.apply_status(Some(id), id, start.status, start.amount)?;
            }
        }
        ctx.fire(EntityId::PLAYER, HookEvent::CombatStart)?;
        for index in 0..ctx.state.enemies.len() {
            ctx.roll_intent(index)?;
        }
        ctx.advance()?;
        drop(ctx);

        invariants::check(&state, &env)
            .map_err(|e| retag(e, TransitionPhase::PostValidate))?;
        Ok(Self {
            state,
            trace_hooks: false,
            last_trace: Vec::new(),
        })
    }

    /// Rebuilds an engine around a previously captured state.
    pub fn from_state(state: CombatState) -> Self {
        Self {
            state,
            trace_hooks: false,
            last_trace: Vec::new(),
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    /// By-value copy of the state; mutating it never affects this engine.
    pub fn snapshot(&self) -> CombatState {
        self.state.clone()
    }

    pub fn restore(&mut self, state: CombatState) {
        self.state = state;
        self.last_trace.clear();
    }

    /// Records every listener invocation of subsequent actions.
    pub fn set_hook_tracing(&mut self, enabled: bool) {
        self.trace_hooks = enabled;
    }

    /// Listener invocations of the last committed action, when tracing is on.
    pub fn last_trace(&self) -> &[FiredHook] {
        &self.last_trace
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Executes one external action with validate-then-commit semantics.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` when the action is rejected (state untouched),
    /// - `Invariant` when applying it would break an engine invariant,
    /// - `Content` when a definition is missing.
    pub fn execute(
        &mut self,
        env: CombatEnv<'_>,
        action: &Action,
    ) -> Result<ActionOutcome, ExecuteError> {
        let plan = match play::check(&self.state, &env, action)? {
            Checked::Ready(plan) => plan,
            Checked::NeedsInput(request) => return Ok(ActionOutcome::NeedsInput(request)),
        };

        let mut next = self.state.clone();
        let mut ctx = ExecContext::new(&mut next, env, self.trace_hooks);
        ctx.execute_plan(plan)?;
        ctx.advance()?;
        ctx.state.actions_applied += 1;
        let trace = ctx.into_trace();

        invariants::check(&next, &env).map_err(|e| retag(e, TransitionPhase::PostValidate))?;
        self.state = next;
        self.last_trace = trace;
        Ok(ActionOutcome::Applied(Box::new(self.observe(env)?)))
    }

    /// Executes an action on a copy and returns the resulting engine, leaving `self`
    /// untouched. Used for look-ahead search.
    pub fn simulate(&self, env: CombatEnv<'_>, action: &Action) -> Result<Self, ExecuteError> {
        let mut branch = self.clone();
        branch.execute(env, action)?;
        Ok(branch)
    }

    pub fn observe(&self, env: CombatEnv<'_>) -> Result<Observation, ExecuteError> {
        Ok(Observation::from_state(&self.state, &env)?)
    }

    pub fn available_actions(&self, env: CombatEnv<'_>) -> Result<Vec<Action>, ExecuteError> {
        Ok(crate::cards::available_actions(&self.state, &env)?)
    }

    /// Restores every RNG stream from a flat counter map (as found in observations
    /// and saved states).
    ///
    /// # Errors
    ///
    /// An unknown stream name in the map is an invariant violation.
    pub fn restore_rng(
        &mut self,
        counters: &std::collections::BTreeMap<String, u64>,
    ) -> Result<(), ExecuteError> {
        let rng = RngStreams::from_counter_map(
            self.state.rng.master_seed(),
            self.state.rng.floor(),
            counters,
        )
        .map_err(InvariantViolation::Rng)?;
        self.state.rng = rng;
        Ok(())
    }
}

fn check_setup(setup: &CombatSetup) -> Result<(), InvariantViolation> {
    let player = &setup.player;
    if player.max_hp <= 0 || player.hp <= 0 || player.hp > player.max_hp {
        return Err(InvariantViolation::HpOutOfRange {
            entity: EntityId::PLAYER,
            hp: player.hp,
            max_hp: player.max_hp,
        });
    }
    if setup.enemies.is_empty() || setup.enemies.len() > CombatConfig::MAX_ENEMIES {
        return Err(InvariantViolation::InvalidSetup(format!(
            "encounter needs 1..={} enemies, got {}",
            CombatConfig::MAX_ENEMIES,
            setup.enemies.len()
        )));
    }
    Ok(())
}

fn retag(error: ExecuteError, phase: TransitionPhase) -> ExecuteError {
    match error {
        ExecuteError::Invariant(inner) => ExecuteError::invariant(phase, inner.error),
        other => other,
    }
}
