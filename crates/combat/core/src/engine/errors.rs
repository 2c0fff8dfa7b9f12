//! Error types for the action execution pipeline.

use crate::action::ActionError;
use crate::env::OracleError;
use crate::error::{CombatError, ErrorContext, ErrorSeverity};
use crate::rng::RngError;
use crate::state::{EntityId, StatusId, TurnPhase};

/// Identifies which stage of the execution pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a pipeline stage with the underlying error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Broken engine invariants. Every variant is a defect, never a normal error path.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("{entity} hp {hp} outside 0..={max_hp}")]
    HpOutOfRange {
        entity: EntityId,
        hp: i32,
        max_hp: i32,
    },

    #[error("{entity} has negative block {block}")]
    NegativeBlock { entity: EntityId, block: i32 },

    #[error("{entity} holds two instances of {status}")]
    DuplicateStatus { entity: EntityId, status: StatusId },

    #[error("{entity} keeps {status} at removal threshold ({amount})")]
    StaleStatus {
        entity: EntityId,
        status: StatusId,
        amount: i32,
    },

    #[error("hand holds {size} cards, limit is {limit}")]
    HandOverflow { size: usize, limit: usize },

    #[error("card uid {uid} appears in more than one pile slot")]
    DuplicateCard { uid: u32 },

    #[error("negative energy {energy}")]
    NegativeEnergy { energy: i32 },

    #[error("combat end entered twice")]
    CombatEndReentered,

    #[error("engine settled in {phase}, expected the player action loop or combat end")]
    UnsettledPhase { phase: TurnPhase },

    #[error("entity {0} does not exist")]
    MissingEntity(EntityId),

    #[error("relic state for a declared listener is missing")]
    MissingRelicState,

    #[error("reaction cascade exceeded {limit} reactions")]
    RunawayCascade { limit: u32 },

    #[error("rng restore failed: {0}")]
    Rng(RngError),

    #[error("invalid combat setup: {0}")]
    InvalidSetup(String),
}

impl CombatError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            HpOutOfRange { .. } => "INVARIANT_HP_OUT_OF_RANGE",
            NegativeBlock { .. } => "INVARIANT_NEGATIVE_BLOCK",
            DuplicateStatus { .. } => "INVARIANT_DUPLICATE_STATUS",
            StaleStatus { .. } => "INVARIANT_STALE_STATUS",
            HandOverflow { .. } => "INVARIANT_HAND_OVERFLOW",
            DuplicateCard { .. } => "INVARIANT_DUPLICATE_CARD",
            NegativeEnergy { .. } => "INVARIANT_NEGATIVE_ENERGY",
            CombatEndReentered => "INVARIANT_COMBAT_END_REENTERED",
            UnsettledPhase { .. } => "INVARIANT_UNSETTLED_PHASE",
            MissingEntity(_) => "INVARIANT_MISSING_ENTITY",
            MissingRelicState => "INVARIANT_MISSING_RELIC_STATE",
            RunawayCascade { .. } => "INVARIANT_RUNAWAY_CASCADE",
            Rng(_) => "INVARIANT_RNG",
            InvalidSetup(_) => "INVARIANT_INVALID_SETUP",
        }
    }
}

/// Coarse classification of an [`ExecuteError`], stable across variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    InvalidAction,
    InvariantViolation,
    ContentMiss,
}

impl ErrorKind {
    /// Process exit code for this kind of failure.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InvalidAction => 2,
            Self::InvariantViolation => 3,
            Self::ContentMiss => 4,
        }
    }
}

/// Errors surfaced while executing an action through the combat engine.
///
/// No variant leaves a trace in the authoritative state: the engine works on a copy
/// and only commits on success.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("invalid action: {0}")]
    InvalidAction(ActionError),

    #[error("invariant violated: {0}")]
    Invariant(TransitionPhaseError<InvariantViolation>),

    #[error("content lookup failed: {0}")]
    Content(OracleError),
}

impl ExecuteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAction(_) => ErrorKind::InvalidAction,
            Self::Invariant(_) => ErrorKind::InvariantViolation,
            Self::Content(_) => ErrorKind::ContentMiss,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    pub(crate) fn invariant(phase: TransitionPhase, violation: InvariantViolation) -> Self {
        Self::Invariant(TransitionPhaseError::new(phase, violation))
    }
}

impl From<ActionError> for ExecuteError {
    fn from(error: ActionError) -> Self {
        Self::InvalidAction(error)
    }
}

impl From<OracleError> for ExecuteError {
    fn from(error: OracleError) -> Self {
        Self::Content(error)
    }
}

/// Violations raised while applying an action are tagged with the apply stage.
impl From<InvariantViolation> for ExecuteError {
    fn from(violation: InvariantViolation) -> Self {
        Self::invariant(TransitionPhase::Apply, violation)
    }
}

impl CombatError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAction(e) => e.severity(),
            Self::Invariant(e) => e.error.severity(),
            Self::Content(e) => e.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InvalidAction(e) => e.context(),
            Self::Invariant(_) | Self::Content(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAction(e) => e.error_code(),
            Self::Invariant(e) => e.error.error_code(),
            Self::Content(e) => e.error_code(),
        }
    }
}
