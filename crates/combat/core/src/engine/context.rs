//! Mutable execution context for one action.

use std::collections::VecDeque;

use super::{ExecuteError, InvariantViolation};
use crate::env::CombatEnv;
use crate::hooks::{FiredHook, Reaction};
use crate::state::{CardInstance, CombatState, Creature, EntityId, RelicId, RelicState, StatusId};

/// Borrowed view used while an action (or a run of automatic phases) executes.
///
/// The state is always a working copy owned by the engine; nothing here touches the
/// authoritative state.
pub(crate) struct ExecContext<'s, 'e> {
    pub state: &'s mut CombatState,
    pub env: CombatEnv<'e>,
    pub(crate) queue: VecDeque<Reaction>,
    pub(crate) draining: bool,
    pub(crate) processed: u32,
    /// The card being played, between leaving the hand and reaching its pile.
    pub(crate) limbo: Option<CardInstance>,
    trace: Option<Vec<FiredHook>>,
}

impl<'s, 'e> ExecContext<'s, 'e> {
    pub fn new(state: &'s mut CombatState, env: CombatEnv<'e>, trace: bool) -> Self {
        Self {
            state,
            env,
            queue: VecDeque::new(),
            draining: false,
            processed: 0,
            limbo: None,
            trace: trace.then(Vec::new),
        }
    }

    pub fn push(&mut self, reaction: Reaction) {
        self.queue.push_back(reaction);
    }

    pub fn record(&mut self, fired: FiredHook) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(fired);
        }
    }

    pub fn into_trace(self) -> Vec<FiredHook> {
        self.trace.unwrap_or_default()
    }

    /// Current hp of an entity, 0 when it does not exist.
    pub fn hp(&self, id: EntityId) -> i32 {
        self.state.creature(id).map_or(0, |c| c.hp)
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Result<&mut Creature, ExecuteError> {
        self.state
            .creature_mut(id)
            .ok_or_else(|| InvariantViolation::MissingEntity(id).into())
    }

    pub fn relic_state(&mut self, id: RelicId) -> Result<&mut RelicState, ExecuteError> {
        self.state
            .relic_mut(id)
            .ok_or_else(|| InvariantViolation::MissingRelicState.into())
    }

    /// Removes `by` stacks from inside a payload-threading listener.
    ///
    /// The stack change is applied at once so later listeners and the damage being
    /// resolved see it; the `StackChanged` notification is queued.
    pub fn consume_status(
        &mut self,
        owner: EntityId,
        id: StatusId,
        by: i32,
    ) -> Result<(), ExecuteError> {
        let desc = self.env.status(id)?;
        let change = self.creature_mut(owner)?.statuses.reduce(desc, by);
        if let Some(change) = change {
            self.push(Reaction::StackChanged(change));
        }
        Ok(())
    }

    /// Runs `f` with reaction draining held back, then drains once.
    ///
    /// Used for multi-hook sequences (one damage resolution, one card effect) whose
    /// reactions must not interleave with the sequence itself.
    pub fn batch<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ExecuteError>,
    ) -> Result<T, ExecuteError> {
        if self.draining {
            return f(self);
        }
        self.draining = true;
        let result = f(self);
        self.draining = false;
        let value = result?;
        self.drain()?;
        Ok(value)
    }
}
