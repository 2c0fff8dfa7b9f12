//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ActionError`, `InvariantViolation`, `OracleError`,
//! `RngError`) live next to the code that raises them; this module provides the
//! shared severity classification and context they carry.
//!
//! # Severity policy
//!
//! - Rejected actions are **Validation** errors: reported to the caller with zero
//!   state mutation.
//! - Broken invariants and content lookup misses are **Fatal**: they indicate a defect
//!   in the engine or the content tables and must never be silently corrected.

use crate::state::{EntityId, TurnPhase};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: card not in hand, not enough energy, wrong phase
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - combat state corrupted or content incomplete, cannot continue.
    ///
    /// Examples: hp above max, duplicate status instance, unknown card id
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an engine or content defect.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Entity involved in the failure (if applicable).
    pub entity: Option<EntityId>,

    /// Turn phase the engine was in when the error was raised.
    pub phase: Option<TurnPhase>,

    /// Player turn number at the time of error.
    pub turn: u32,

    /// Optional static message providing additional context.
    #[cfg_attr(feature = "serde", serde(skip_deserializing))]
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given turn.
    #[must_use]
    pub const fn new(turn: u32) -> Self {
        Self {
            entity: None,
            phase: None,
            turn,
            message: None,
        }
    }

    /// Attaches an entity to this context (builder pattern).
    #[must_use]
    pub const fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Attaches the current phase to this context (builder pattern).
    #[must_use]
    pub const fn with_phase(mut self, phase: TurnPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all combat-core errors.
///
/// - All error enums implement this trait
/// - `#[derive(thiserror::Error)]` provides Display/Error
/// - Severity is classified by recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
