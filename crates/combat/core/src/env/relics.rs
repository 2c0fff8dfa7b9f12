//! Relic definitions.

use crate::hooks::HookSet;
use crate::state::RelicId;

/// Numeric parameters and hook set of one relic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicDefinition {
    pub id: RelicId,
    pub hooks: HookSet,
    /// Primary magnitude (block gained, damage dealt, energy granted, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub amount: i32,
    /// Counter value at which the relic fires, for counting relics.
    #[cfg_attr(feature = "serde", serde(default))]
    pub threshold: i32,
    /// Lower bound of the damage window for range-bounded relics, exclusive.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lower: i32,
}

pub trait RelicOracle: Send + Sync {
    fn relic(&self, id: RelicId) -> Option<&RelicDefinition>;
}
