//! Status descriptors: the data half of the status registry.
//!
//! A descriptor answers *how* a status stacks, clamps, decays and which hooks it
//! listens to. What it does when a hook fires is keyed by [`StatusId`] in
//! `hooks::status`, and the order listeners fire in is declared in `hooks::order`.

use crate::hooks::HookSet;
use crate::state::StatusId;

/// Whether a status helps or hinders its owner. Artifact only blocks debuffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    Buff,
    Debuff,
}

/// How re-application merges into an existing instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingRule {
    Additive,
    OverwriteIfGreater,
    BooleanPresence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignRule {
    CanGoNegative,
    ClampedAtZero,
}

/// Phase boundary at which the decay sweep touches this status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecayTiming {
    /// End of the owner's own turn.
    TurnEnd,
    /// End of the round, after every enemy has acted.
    RoundEnd,
    None,
}

/// How much the decay sweep removes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecayStep {
    #[default]
    One,
    All,
}

/// When an application sets `just_applied`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FreshGuard {
    /// Every application skips the next sweep.
    Always,
    /// Only applications made after the player's turn ended (enemy turn, round end).
    AfterPlayerTurn,
    #[default]
    Never,
}

/// Numeric behavior descriptor for one status.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDescriptor {
    pub id: StatusId,
    pub polarity: Polarity,
    pub stacking: StackingRule,
    pub sign: SignRule,
    #[cfg_attr(feature = "serde", serde(default = "no_decay"))]
    pub decay: DecayTiming,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decay_step: DecayStep,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fresh_guard: FreshGuard,
    /// Amount at which the instance is removed (`<=` when clamped, `==` when signed).
    #[cfg_attr(feature = "serde", serde(default))]
    pub remove_at: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_max"))]
    pub max_amount: i32,
    /// Factor used by damage and block modifiers (Weak 0.75, Vulnerable 1.5, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub multiplier: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hooks: HookSet,
}

#[cfg(feature = "serde")]
fn no_decay() -> DecayTiming {
    DecayTiming::None
}

#[cfg(feature = "serde")]
fn default_max() -> i32 {
    crate::config::CombatConfig::DEFAULT_MAX_STATUS_AMOUNT
}

impl StatusDescriptor {
    /// Descriptor with additive, clamped, non-decaying defaults.
    pub fn new(id: StatusId, polarity: Polarity) -> Self {
        Self {
            id,
            polarity,
            stacking: StackingRule::Additive,
            sign: SignRule::ClampedAtZero,
            decay: DecayTiming::None,
            decay_step: DecayStep::One,
            fresh_guard: FreshGuard::Never,
            remove_at: 0,
            max_amount: crate::config::CombatConfig::DEFAULT_MAX_STATUS_AMOUNT,
            multiplier: None,
            hooks: HookSet::empty(),
        }
    }

    /// Removal predicate applied after every mutation.
    pub fn should_remove(&self, amount: i32) -> bool {
        match self.sign {
            SignRule::ClampedAtZero => amount <= self.remove_at,
            SignRule::CanGoNegative => amount == self.remove_at,
        }
    }

    /// True when applying `amount` counts as a debuff for Artifact purposes.
    ///
    /// Negative applications of a signed buff (losing Strength) are debuffs.
    pub fn is_debuff_application(&self, amount: i32) -> bool {
        match self.polarity {
            Polarity::Debuff => true,
            Polarity::Buff => self.sign == SignRule::CanGoNegative && amount < 0,
        }
    }
}

/// Read-only access to status descriptors.
pub trait StatusOracle: Send + Sync {
    fn status(&self, id: StatusId) -> Option<&StatusDescriptor>;
}
