//! Rejections of malformed or illegal actions.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::TurnPhase;

/// Why an action was rejected. Rejection never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("action api version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("combat is over")]
    CombatOver,

    #[error("actions are not accepted during {phase}")]
    WrongPhase { phase: TurnPhase },

    #[error("hand index {index} out of range (hand size {hand_size})")]
    HandIndexOutOfRange { index: usize, hand_size: usize },

    #[error("card '{card}' cannot be played")]
    CardUnplayable { card: String },

    #[error("card '{card}' costs {cost}, only {energy} energy available")]
    NotEnoughEnergy {
        card: String,
        cost: i32,
        energy: i32,
    },

    #[error("attacks cannot be played while entangled")]
    Entangled,

    #[error("enemy index {target} is not a living enemy")]
    InvalidTarget { target: usize },

    #[error("a target was supplied for an untargeted card or potion")]
    UnexpectedTarget,

    #[error("choice {index} is not a valid option")]
    InvalidChoice { index: usize },

    #[error("expected {expected} choices, got {got}")]
    WrongChoiceCount { expected: usize, got: usize },

    #[error("choice {index} given more than once")]
    DuplicateChoice { index: usize },

    #[error("choices were supplied for a card that takes none")]
    UnexpectedChoices,

    #[error("potion slot {slot} out of range")]
    PotionSlotOutOfRange { slot: usize },

    #[error("potion slot {slot} is empty")]
    PotionSlotEmpty { slot: usize },
}

impl CombatError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughEnergy { .. } | Self::InvalidTarget { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion { .. } => "ACTION_UNSUPPORTED_VERSION",
            Self::CombatOver => "ACTION_COMBAT_OVER",
            Self::WrongPhase { .. } => "ACTION_WRONG_PHASE",
            Self::HandIndexOutOfRange { .. } => "ACTION_HAND_INDEX_OUT_OF_RANGE",
            Self::CardUnplayable { .. } => "ACTION_CARD_UNPLAYABLE",
            Self::NotEnoughEnergy { .. } => "ACTION_NOT_ENOUGH_ENERGY",
            Self::Entangled => "ACTION_ENTANGLED",
            Self::InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            Self::UnexpectedTarget => "ACTION_UNEXPECTED_TARGET",
            Self::InvalidChoice { .. } => "ACTION_INVALID_CHOICE",
            Self::WrongChoiceCount { .. } => "ACTION_WRONG_CHOICE_COUNT",
            Self::DuplicateChoice { .. } => "ACTION_DUPLICATE_CHOICE",
            Self::UnexpectedChoices => "ACTION_UNEXPECTED_CHOICES",
            Self::PotionSlotOutOfRange { .. } => "ACTION_POTION_SLOT_OUT_OF_RANGE",
            Self::PotionSlotEmpty { .. } => "ACTION_POTION_SLOT_EMPTY",
        }
    }
}
