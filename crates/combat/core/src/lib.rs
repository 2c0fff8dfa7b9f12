//! Deterministic combat re-simulation engine.
//!
//! `combat-core` defines the canonical combat rules (turn phases, damage and block
//! pipeline, status hooks, card piles, RNG streams) and exposes a pure
//! action/observation API. All state mutation flows through
//! [`engine::CombatEngine`], and content (cards, statuses, relics, potions, enemies)
//! is consumed through the oracle traits in [`env`].
pub mod action;
pub mod cards;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod hooks;
pub mod observation;
pub mod rng;
pub mod state;

#[cfg(test)]
pub(crate) mod testkit;

pub use action::{
    ACTION_API_VERSION, Action, ActionEnvelope, ActionError, ActionOutcome, SelectionKind,
    SelectionRequest,
};
pub use cards::{Amount, CardEffect, EffectTarget};
pub use combat::{BlockCalc, DamageClass, DamageEvent, DamageModifiers, compute_damage};
pub use config::CombatConfig;
pub use engine::{
    AI_ROLL_BOUND, CardSpec, CombatEngine, CombatSetup, EnemySetup, ErrorKind, ExecuteError,
    InvariantViolation, PlayerSetup, RelicSpec, TransitionPhase,
};
pub use env::{
    AiPattern, CardDefinition, CardFlags, CardOracle, CardStats, CardTarget, CardType,
    CardUpgrade, CombatEnv, ContentSnapshot, DecayStep, DecayTiming, EnemyDefinition,
    EnemyOracle, FreshGuard, IntentKind, MoveDefinition, MoveEffect, MoveTarget, OracleError,
    Polarity, PotionDefinition, PotionOracle, RelicDefinition, RelicOracle, SignRule,
    StackingRule, StartingStatus, StatusDescriptor, StatusOracle, WeightedMove,
};
pub use error::{CombatError, ErrorContext, ErrorSeverity};
pub use hooks::{HookKind, HookSet, Listener};
pub use observation::{
    EnemyView, IntentView, Observation, PilesView, PlayerView, RelicView, StatusView,
};
pub use rng::{RngError, RngStreams, Seed, StreamName};
pub use state::{
    CardId, CardInstance, CombatOutcome, CombatState, Creature, EnemyEntity, EnemyId, EntityId,
    Intent, PileKind, Piles, PlayerEntity, PotionId, RelicId, RelicState, Stance, StatusId,
    StatusInstance, StatusSet, TurnPhase,
};
