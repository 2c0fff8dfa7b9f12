//! Hook firing and reaction draining.

use super::relic;
use super::status::{self, ActiveStatus};
use super::{FiredHook, HookEvent, Listener, order};
use crate::engine::{ExecContext, ExecuteError, InvariantViolation};
use crate::state::EntityId;

impl ExecContext<'_, '_> {
    /// Fires `event` on `subject`'s statuses (and relics, for the player) in declared
    /// order, threading the payload through every listener.
    ///
    /// Reactions enqueued by listeners are drained before returning unless a drain is
    /// already in progress, or the hook is payload-threading.
    pub(crate) fn fire(
        &mut self,
        subject: EntityId,
        mut event: HookEvent,
    ) -> Result<HookEvent, ExecuteError> {
        let kind = event.kind();
        let terminal = matches!(event, HookEvent::Victory | HookEvent::Defeat);
        if !terminal && !self.state.is_alive(subject) {
            return Ok(event);
        }

        for &listener in order::listeners(kind) {
            match listener {
                Listener::Status(id) => {
                    let Some(instance) = self
                        .state
                        .creature(subject)
                        .and_then(|c| c.statuses.get(id))
                    else {
                        continue;
                    };
                    let active = ActiveStatus {
                        id,
                        owner: subject,
                        amount: instance.amount,
                        just_applied: instance.just_applied,
                    };
                    if !self.env.status(id)?.hooks.contains(kind.flag()) {
                        continue;
                    }
                    self.record(FiredHook {
                        hook: kind,
                        subject,
                        listener,
                    });
                    status::on_hook(self, active, &mut event)?;
                }
                Listener::Relic(id) => {
                    if !subject.is_player() || !self.state.has_relic(id) {
                        continue;
                    }
                    let def = self.env.relic(id)?;
                    if !def.hooks.contains(kind.flag()) {
                        continue;
                    }
                    self.record(FiredHook {
                        hook: kind,
                        subject,
                        listener,
                    });
                    relic::on_hook(self, def, &mut event)?;
                }
            }
        }

        if !kind.is_modifier() && !self.draining {
            self.drain()?;
        }
        Ok(event)
    }

    /// Fires on the player, then on every living enemy in encounter order.
    pub(crate) fn fire_everyone(&mut self, event: HookEvent) -> Result<(), ExecuteError> {
        self.fire(EntityId::PLAYER, event.clone())?;
        for target in self.state.living_enemies() {
            self.fire(target, event.clone())?;
        }
        Ok(())
    }

    /// Processes queued reactions first-in first-out. Reactions that fire further hooks
    /// only enqueue, so cascades run breadth-first.
    pub(crate) fn drain(&mut self) -> Result<(), ExecuteError> {
        if self.draining {
            return Ok(());
        }
        self.draining = true;
        while let Some(reaction) = self.queue.pop_front() {
            self.processed += 1;
            if self.processed > self.state.config.max_reactions {
                return Err(InvariantViolation::RunawayCascade {
                    limit: self.state.config.max_reactions,
                }
                .into());
            }
            self.apply_reaction(reaction)?;
        }
        self.draining = false;
        Ok(())
    }
}
