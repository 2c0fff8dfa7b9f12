//! Traits describing read-only content.
//!
//! Oracles expose card, status, relic, potion and enemy definitions. The
//! [`CombatEnv`] aggregate bundles them so the engine can look up everything it needs
//! without coupling to a concrete content source. The engine never embeds content
//! tables itself.
mod cards;
mod enemies;
mod error;
mod potions;
mod relics;
mod snapshot;
mod statuses;

pub use cards::{CardDefinition, CardFlags, CardOracle, CardStats, CardTarget, CardType, CardUpgrade};
pub use enemies::{
    AiPattern, EnemyDefinition, EnemyOracle, IntentKind, MoveDefinition, MoveEffect, MoveTarget,
    StartingStatus, WeightedMove,
};
pub use error::OracleError;
pub use potions::{PotionDefinition, PotionOracle};
pub use relics::{RelicDefinition, RelicOracle};
pub use snapshot::ContentSnapshot;
pub use statuses::{
    DecayStep, DecayTiming, FreshGuard, Polarity, SignRule, StackingRule, StatusDescriptor,
    StatusOracle,
};

use crate::hooks::{self, HookKind};
use crate::state::{CardId, EnemyId, PotionId, RelicId, StatusId};

/// Aggregates the read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    cards: &'a dyn CardOracle,
    statuses: &'a dyn StatusOracle,
    relics: &'a dyn RelicOracle,
    potions: &'a dyn PotionOracle,
    enemies: &'a dyn EnemyOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        cards: &'a dyn CardOracle,
        statuses: &'a dyn StatusOracle,
        relics: &'a dyn RelicOracle,
        potions: &'a dyn PotionOracle,
        enemies: &'a dyn EnemyOracle,
    ) -> Self {
        Self {
            cards,
            statuses,
            relics,
            potions,
            enemies,
        }
    }

    /// Uses one snapshot for every oracle.
    pub fn from_snapshot(snapshot: &'a ContentSnapshot) -> Self {
        Self::new(snapshot, snapshot, snapshot, snapshot, snapshot)
    }

    /// Returns the card definition for `id`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CardNotFound` if the content tables lack the card.
    pub fn card(&self, id: &CardId) -> Result<&'a CardDefinition, OracleError> {
        self.cards
            .card(id)
            .ok_or_else(|| OracleError::CardNotFound(id.clone()))
    }

    /// Returns the status descriptor for `id`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::StatusNotFound` if the content tables lack the status.
    pub fn status(&self, id: StatusId) -> Result<&'a StatusDescriptor, OracleError> {
        self.statuses
            .status(id)
            .ok_or(OracleError::StatusNotFound(id))
    }

    pub fn relic(&self, id: RelicId) -> Result<&'a RelicDefinition, OracleError> {
        self.relics.relic(id).ok_or(OracleError::RelicNotFound(id))
    }

    pub fn potion(&self, id: &PotionId) -> Result<&'a PotionDefinition, OracleError> {
        self.potions
            .potion(id)
            .ok_or_else(|| OracleError::PotionNotFound(id.clone()))
    }

    pub fn enemy(&self, id: &EnemyId) -> Result<&'a EnemyDefinition, OracleError> {
        self.enemies
            .enemy(id)
            .ok_or_else(|| OracleError::EnemyNotFound(id.clone()))
    }

    /// Checks that every hook a status or relic declares has a declared firing slot.
    ///
    /// # Errors
    ///
    /// Returns the first missing status/relic or the first undeclared hook.
    pub fn validate_hooks(
        &self,
        statuses: impl IntoIterator<Item = StatusId>,
        relics: impl IntoIterator<Item = RelicId>,
    ) -> Result<(), OracleError> {
        for id in statuses {
            let desc = self.status(id)?;
            for kind in HookKind::ALL {
                if desc.hooks.contains(kind.flag())
                    && !hooks::order::declares(kind, hooks::Listener::Status(id))
                {
                    return Err(OracleError::UndeclaredHook {
                        subject: id.to_string(),
                        hook: kind,
                    });
                }
            }
        }
        for id in relics {
            let def = self.relic(id)?;
            for kind in HookKind::ALL {
                if def.hooks.contains(kind.flag())
                    && !hooks::order::declares(kind, hooks::Listener::Relic(id))
                {
                    return Err(OracleError::UndeclaredHook {
                        subject: id.to_string(),
                        hook: kind,
                    });
                }
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv").finish_non_exhaustive()
    }
}
