//! Potion definitions.

use crate::cards::CardEffect;
use crate::state::PotionId;

use super::CardTarget;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionDefinition {
    pub id: PotionId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: CardTarget,
    pub effects: Vec<CardEffect>,
}

pub trait PotionOracle: Send + Sync {
    fn potion(&self, id: &PotionId) -> Option<&PotionDefinition>;
}
