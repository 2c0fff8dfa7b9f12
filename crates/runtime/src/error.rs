//! Unified error type surfaced by sessions, replays and audits.
//!
//! Every variant maps onto a process exit code so the `replay` binary can report
//! failures without inspecting messages.

use combat_core::{ErrorKind, ExecuteError, SelectionRequest};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Exit code for content, configuration and I/O failures.
pub const EXIT_CONTENT: i32 = 4;
/// Exit code for an audit that found a divergence.
pub const EXIT_DIVERGENCE: i32 = 5;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat setup failed: {0}")]
    Setup(#[source] ExecuteError),

    #[error("action #{nonce} ({action}) failed: {source}")]
    Execute {
        nonce: u64,
        action: &'static str,
        #[source]
        source: ExecuteError,
    },

    /// A logged action asked for a selection it should already carry.
    #[error("action #{nonce} is incomplete: needs {:?} from {:?}", .request.kind, .request.options)]
    IncompleteAction {
        nonce: u64,
        request: Box<SelectionRequest>,
    },

    #[error("unsupported replay file version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("state digest failed: {0}")]
    Digest(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("audit diverged at step {step}, {path}")]
    Divergence { step: usize, path: String },
}

impl RuntimeError {
    /// Process exit code: 2 invalid action, 3 invariant violation, 4 content/config/IO,
    /// 5 audit divergence.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Setup(source) | Self::Execute { source, .. } => source.exit_code(),
            Self::IncompleteAction { .. } => ErrorKind::InvalidAction.exit_code(),
            Self::Digest(_) => ErrorKind::InvariantViolation.exit_code(),
            Self::UnsupportedVersion { .. } | Self::Repository(_) | Self::Content(_) => {
                EXIT_CONTENT
            }
            Self::Divergence { .. } => EXIT_DIVERGENCE,
        }
    }

    /// The engine error behind this failure, if any.
    pub fn execute_error(&self) -> Option<&ExecuteError> {
        match self {
            Self::Setup(source) | Self::Execute { source, .. } => Some(source),
            _ => None,
        }
    }
}
