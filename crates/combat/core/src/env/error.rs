//! Content lookup errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::hooks::HookKind;
use crate::state::{CardId, EnemyId, PotionId, RelicId, StatusId};

/// Errors that occur when the content tables cannot answer a lookup.
///
/// The content tables are assumed complete; every miss indicates a registration gap
/// in the data, so all variants are fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("card definition '{0}' not found")]
    CardNotFound(CardId),

    #[error("status descriptor {0} not found")]
    StatusNotFound(StatusId),

    #[error("relic definition {0} not found")]
    RelicNotFound(RelicId),

    #[error("potion definition '{0}' not found")]
    PotionNotFound(PotionId),

    #[error("enemy definition '{0}' not found")]
    EnemyNotFound(EnemyId),

    #[error("enemy '{enemy}' has no move {move_id}")]
    MoveNotFound { enemy: EnemyId, move_id: u8 },

    /// A descriptor declares a hook for which no firing order is declared.
    #[error("{subject} declares hook {hook} but is missing from its firing order")]
    UndeclaredHook { subject: String, hook: HookKind },
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CardNotFound(_) => "ORACLE_CARD_NOT_FOUND",
            StatusNotFound(_) => "ORACLE_STATUS_NOT_FOUND",
            RelicNotFound(_) => "ORACLE_RELIC_NOT_FOUND",
            PotionNotFound(_) => "ORACLE_POTION_NOT_FOUND",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
            MoveNotFound { .. } => "ORACLE_MOVE_NOT_FOUND",
            UndeclaredHook { .. } => "ORACLE_UNDECLARED_HOOK",
        }
    }
}
